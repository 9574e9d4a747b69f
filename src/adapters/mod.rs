pub mod markup;
pub mod renderer;
