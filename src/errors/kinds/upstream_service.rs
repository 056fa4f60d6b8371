#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamService {
    Geolocation,
    CountryDirectory,
    CurrencyExchange,
}

impl std::fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geolocation => write!(f, "geolocation"),
            Self::CountryDirectory => write!(f, "country directory"),
            Self::CurrencyExchange => write!(f, "currency exchange"),
        }
    }
}
