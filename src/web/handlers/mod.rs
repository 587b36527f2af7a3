pub mod jobs;
pub mod materials;
pub mod saved;
pub mod uploads;

pub use jobs::*;
pub use materials::*;
pub use saved::*;
pub use uploads::*;
