use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Too few version numbers in string {0}")]
    TooFewNumbers(String),

    #[error("Too many version numbers in string {0}")]
    TooManyNumbers(String),

    #[error("Failed to parse u8 number from string {0}")]
    NumberParseError(String)
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8
}

impl Version {
    #[inline]
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch
        }
    }

    /// Get release tag form of the version
    ///
    /// `Version::new(10, 19, 2).tag()` -> `v10.19.2`
    #[inline]
    pub fn tag(&self) -> String {
        format!("v{self}")
    }
}

impl std::str::FromStr for Version {
    type Err = Error;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        // Release tags prefix versions with `v`
        let raw = version.strip_prefix(['v', 'V'])
            .unwrap_or(version);

        if raw.is_empty() {
            return Err(Error::TooFewNumbers(version.to_string()));
        }

        let numbers = raw.split('.').collect::<Vec<_>>();

        if numbers.len() > 3 {
            return Err(Error::TooManyNumbers(version.to_string()));
        }

        // Missing numbers are kept at zero (`10.19` -> `10.19.0`)
        let mut parsed = [0; 3];

        for (i, number) in numbers.into_iter().enumerate() {
            let Ok(number) = number.parse::<u8>() else {
                return Err(Error::NumberParseError(number.to_string()));
            };

            parsed[i] = number;
        }

        Ok(Self {
            major: parsed[0],
            minor: parsed[1],
            patch: parsed[2]
        })
    }
}

impl std::fmt::Display for Version {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        match other.parse::<Version>() {
            Ok(version) => *self == version,
            Err(_) => false
        }
    }
}

impl PartialEq<String> for Version {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self == &other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str() -> Result<(), Error> {
        assert_eq!("10.19.2".parse(), Ok(Version::new(10, 19, 2)));
        assert_eq!("v10.19.2".parse(), Ok(Version::new(10, 19, 2)));
        assert_eq!("V10.19.2".parse(), Ok(Version::new(10, 19, 2)));

        assert_eq!("1.2.3".parse(), Ok(Version::new(1, 2, 3)));
        assert_eq!("1.2".parse(),   Ok(Version::new(1, 2, 0)));
        assert_eq!("1".parse(),     Ok(Version::new(1, 0, 0)));
        assert_eq!("v1".parse(),    Ok(Version::new(1, 0, 0)));

        assert_eq!("0.0.0".parse(), Ok(Version::new(0, 0, 0)));
        assert_eq!("255.255.255".parse(), Ok(Version::new(255, 255, 255)));

        assert!("".parse::<Version>().is_err());
        assert!("v".parse::<Version>().is_err());
        assert!("..0".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("256.0.0".parse::<Version>().is_err());
        assert!("example string".parse::<Version>().is_err());

        Ok(())
    }

    #[test]
    fn display() {
        let version = Version::new(10, 19, 2);

        assert_eq!(version.to_string(), "10.19.2");
        assert_eq!(version.tag(), "v10.19.2");

        assert_eq!(version, "10.19.2");
        assert_eq!(version, "v10.19.2");
        assert_eq!(version, String::from("10.19.2"));
    }

    #[test]
    fn ordering() {
        assert!(Version::new(10, 19, 2) > Version::new(10, 19, 1));
        assert!(Version::new(10, 19, 2) < Version::new(10, 20, 0));
        assert!(Version::new(2, 0, 0) < Version::new(10, 0, 0));
    }
}
