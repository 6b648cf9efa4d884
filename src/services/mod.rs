pub mod exercises;
pub mod sessions;

pub use exercises::ExerciseService;
pub use sessions::SessionService;
