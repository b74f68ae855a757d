pub use super::callback_requests::Entity as CallbackRequests;
pub use super::nda_requests::Entity as NdaRequests;
pub use super::projects::Entity as Projects;
pub use super::users::Entity as Users;
