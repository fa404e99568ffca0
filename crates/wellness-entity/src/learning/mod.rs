//! Learning content: trails group courses, courses hold modules, modules
//! hold lessons.

pub mod course;
pub mod lesson;
pub mod module;
pub mod trail;

pub use course::{COURSE, Course, NewCourse};
pub use lesson::{LESSON, Lesson, NewLesson};
pub use module::{MODULE, Module, NewModule};
pub use trail::{NewTrail, TRAIL, Trail};
