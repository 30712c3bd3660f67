mod contact;

pub use contact::{ArcEllipseContact, ContactResult};
