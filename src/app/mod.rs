// Application layer - Use case interactors

pub mod container;
pub mod pipeline_interactor;
pub mod settings;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use pipeline_interactor::PipelineInteractor;
pub use settings::{Concurrency, PipelineSettings};
