pub mod catalog;
pub mod engagement;
pub mod notice;

pub use catalog::{Faculty, Note, Program, ProgramLevel, Subject};
pub use engagement::{Heartbeat, VisitorStats};
pub use notice::{Notice, NoticeCandidate, NoticeCategory, NoticePriority};
