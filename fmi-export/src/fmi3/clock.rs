/// A runtime clock type for FMU variables
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clock(pub bool);
