#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetComponent {
    Prefix,
    Sign,
    Hours,
    Separator,
    Minutes,
}

impl std::fmt::Display for OffsetComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Sign => write!(f, "sign"),
            Self::Hours => write!(f, "hours"),
            Self::Separator => write!(f, "separator"),
            Self::Minutes => write!(f, "minutes"),
        }
    }
}
