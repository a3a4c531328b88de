mod schedule;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;

pub use schedule::Schedule;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SupplierKey {
    Gerecht,
    Umc,
    Refter,
    Fnwi,
    Fest,
}

impl SupplierKey {
    pub const ALL: [Self; 5] = [Self::Gerecht, Self::Umc, Self::Refter, Self::Fnwi, Self::Fest];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gerecht => "gerecht",
            Self::Umc => "umc",
            Self::Refter => "refter",
            Self::Fnwi => "fnwi",
            Self::Fest => "fest",
        }
    }

    #[must_use]
    pub const fn friendly_name(self) -> &'static str {
        match self {
            Self::Gerecht => "Het Gerecht",
            Self::Umc => "Radboud UMC",
            Self::Refter => "De Refter",
            Self::Fnwi => "FNWI",
            Self::Fest => "Cafetaria De Fest",
        }
    }

    const fn schedule(self) -> Schedule {
        match self {
            Self::Gerecht => Schedule::HetGerecht,
            Self::Umc => Schedule::RadboudUmc,
            Self::Refter => Schedule::Refter,
            Self::Fnwi => Schedule::Fnwi,
            Self::Fest => Schedule::DeFest,
        }
    }
}

impl Display for SupplierKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedSupplier(pub String);

impl Display for UnrecognizedSupplier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized supplier: {:?}", self.0)
    }
}

impl std::error::Error for UnrecognizedSupplier {}

impl FromStr for SupplierKey {
    type Err = UnrecognizedSupplier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == lower)
            .ok_or_else(|| UnrecognizedSupplier(s.to_owned()))
    }
}

/// A food supplier: who it is and when it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supplier {
    key: SupplierKey,
    schedule: Schedule,
}

impl Supplier {
    #[must_use]
    pub const fn new(key: SupplierKey) -> Self {
        Self {
            key,
            schedule: key.schedule(),
        }
    }

    #[must_use]
    pub const fn decommissioned(key: SupplierKey) -> Self {
        Self {
            key,
            schedule: Schedule::Decommissioned,
        }
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> SupplierKey {
        self.key
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.key.friendly_name()
    }

    #[inline]
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn is_open(&self, dt: &NaiveDateTime) -> bool {
        self.schedule.is_open(dt)
    }

    pub fn will_open(&self, dt: &NaiveDateTime) -> bool {
        self.schedule.will_open(dt)
    }

    pub fn is_open_for_lunch(&self, dt: &NaiveDateTime) -> bool {
        self.schedule.is_open_for_lunch(dt)
    }

    pub fn is_open_for_dinner(&self, dt: &NaiveDateTime) -> bool {
        self.schedule.is_open_for_dinner(dt)
    }
}

/// The fixed set of suppliers the bot knows about, in display order.
#[derive(Debug, Clone)]
pub struct Registry {
    suppliers: Vec<Supplier>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Registry {
    /// Every known supplier, with the ones in `decommissioned` permanently closed.
    #[must_use]
    pub fn new(decommissioned: &[SupplierKey]) -> Self {
        let suppliers = SupplierKey::ALL
            .into_iter()
            .map(|key| {
                if decommissioned.contains(&key) {
                    log::info!("{} is marked as decommissioned", key.friendly_name());
                    Supplier::decommissioned(key)
                } else {
                    Supplier::new(key)
                }
            })
            .collect();
        Self { suppliers }
    }

    pub fn get(&self, key: SupplierKey) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.key == key)
    }

    /// Case-insensitive lookup by the key users type.
    pub fn lookup(&self, name: &str) -> Result<&Supplier, UnrecognizedSupplier> {
        let key: SupplierKey = name.parse()?;
        self.get(key)
            .ok_or_else(|| UnrecognizedSupplier(name.to_owned()))
    }

    pub fn keys(&self) -> impl Iterator<Item = SupplierKey> + '_ {
        self.suppliers.iter().map(Supplier::key)
    }

    /// `gerecht, umc, ...`
    #[must_use]
    pub fn key_list(&self) -> String {
        self.keys()
            .map(SupplierKey::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
