pub(crate) mod descriptor;
pub(crate) mod ease;
pub(crate) mod element;
pub(crate) mod list;
pub(crate) mod node;
