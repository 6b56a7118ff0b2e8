pub mod assignments;
pub mod auth;
pub mod courses;
pub mod guardians;
pub mod reports;
pub mod submissions;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use guardians::configure_guardian_routes;
pub use reports::configure_report_routes;
pub use submissions::configure_submission_routes;
