// A.L.M.A client core
//
// Identifier validators for the registration forms, the organization
// lifecycle rules, professional-patient assignments, and the roles that gate
// them. Talks to the backend only through the collaborator traits in `kernel`.

pub mod common;
pub mod domains;
pub mod kernel;
