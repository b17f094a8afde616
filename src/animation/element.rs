/// Kind of the scene element that owns an animation list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Text node; fades are expressed through the alpha channel.
    Text,
    /// Still image.
    #[default]
    Image,
    /// Video clip.
    Video,
    /// Any other node type.
    #[serde(other)]
    Other,
}

/// What the filter builders need to know about the owning element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementInfo {
    /// Element identifier; animation nodes refer back to it.
    pub id: String,
    /// Element kind.
    #[serde(default, rename = "type")]
    pub kind: ElementKind,
    /// Overlay position, in pixels.
    #[serde(default)]
    pub x: f64,
    /// Overlay position, in pixels.
    #[serde(default)]
    pub y: f64,
    /// Element width in pixels.
    pub width: u32,
    /// Element height in pixels.
    pub height: u32,
    /// Scene canvas width in pixels.
    pub canvas_width: u32,
    /// Scene canvas height in pixels.
    pub canvas_height: u32,
}

impl ElementInfo {
    /// Element of `kind` at the canvas origin.
    pub fn new(id: impl Into<String>, kind: ElementKind, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            x: 0.0,
            y: 0.0,
            width,
            height,
            canvas_width: width,
            canvas_height: height,
        }
    }

    /// Builder-style position setter.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Builder-style canvas size setter.
    pub fn on_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Resting overlay position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }
}
