use wavyte_anim::{
    AnimationDescriptor, AnimationList, EffectRegistry, EffectRequest, ElementInfo, ElementKind,
    ShowType,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let registry = EffectRegistry::builtin();
    let title = ElementInfo::new("title", ElementKind::Text, 880, 120)
        .at(200.0, 300.0)
        .on_canvas(1280, 720);

    let mut list = AnimationList::new(title);
    list.add_effect(&registry, "moveInLeft");
    list.add_animate(
        AnimationDescriptor::new("rotate", ShowType::Out, 0.8, 4.2)
            .with("to", 30.0)
            .with("pad", true),
    );
    list.add_effect(&registry, EffectRequest::named("fadeOut", None, Some(4.0)));
    list.modify_delay_time(list.get_appear_time());

    println!("duration: {}s", list.get_duration());
    for filter in list.concat_filters()? {
        println!("{}", filter.to_filter_string());
    }

    Ok(())
}
