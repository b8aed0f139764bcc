mod animatable;
mod color;
pub mod interpolate;
mod particles;
mod timeline;
mod timing;

pub use animatable::Animatable;
pub use color::ColorTransition;
pub use particles::{random_source, Bubble, ParticleField, RandomSource};
pub use timeline::{AnimationRun, Phase, RunStep, Timeline};
pub use timing::TimingFunction;

#[cfg(test)]
pub(crate) use particles::tests::Sequence;
