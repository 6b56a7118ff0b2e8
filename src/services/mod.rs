pub mod access;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod guardians;
pub mod reports;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use guardians::GuardianService;
pub use reports::ReportService;
pub use submissions::SubmissionService;
