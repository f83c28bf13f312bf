//! Integration tests for the extent repair engine and the entity shim.
//!
//! Every scenario scripts the defective extent a real provider would report
//! and checks the token sequence the repair produces.

mod entity_registration;
