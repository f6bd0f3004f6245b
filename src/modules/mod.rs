pub mod base;
pub mod classifiers;
pub mod dispatcher;
pub mod mover;
pub mod organizer;
