//! The `noms [supplier] [when]` command.

use chrono::NaiveDateTime;

use crate::date::{self, TimeQuery};
use crate::fetch::MenuFetcher;
use crate::supplier::{Registry, Supplier};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Meal {
    Lunch,
    Dinner,
}

impl Meal {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

/// How a single command ended, before it is turned into chat lines.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    NoSupplier {
        known: String,
    },
    UnrecognizedSupplier {
        known: String,
    },
    SupplierClosed {
        name: &'static str,
        query: TimeQuery,
    },
    MenuUnavailable {
        name: &'static str,
        query: TimeQuery,
    },
    Menu {
        name: &'static str,
        query: TimeQuery,
        lines: Vec<String>,
        serving_now: Option<Meal>,
    },
}

impl Outcome {
    /// One chat message per element, in order.
    pub fn into_replies(self) -> Vec<String> {
        match self {
            Self::NoSupplier { known } => {
                vec![format!("Where would you like to eat? I know the menu for: {known}")]
            }
            Self::UnrecognizedSupplier { known } => vec![format!(
                "I don't have a menu for that place... How about one of these: {known}"
            )],
            Self::SupplierClosed { name, query } => {
                if query.refers_to_now() {
                    vec![format!("Sorry, {name} has closed for the day...")]
                } else {
                    vec![format!("Sorry, {name} is not open on {}...", query.day_label())]
                }
            }
            Self::MenuUnavailable { name, query } => vec![format!(
                "Sorry, I was unable to get a menu for {name} for {}",
                query.day_label()
            )],
            Self::Menu {
                name,
                query,
                lines,
                serving_now,
            } => {
                let mut replies = Vec::with_capacity(lines.len() + 2);
                replies.push(format!(
                    "Here's the menu for {name} for {}:",
                    query.day_label()
                ));
                replies.extend(lines);
                if let Some(meal) = serving_now {
                    replies.push(format!("{name} is open for {} right now.", meal.as_str()));
                }
                replies
            }
        }
    }
}

#[derive(Debug)]
pub struct NomsHandler<F> {
    registry: Registry,
    fetcher: F,
}

impl<F: MenuFetcher> NomsHandler<F> {
    pub const fn new(registry: Registry, fetcher: F) -> Self {
        Self { registry, fetcher }
    }

    /// Handles the arguments of one `noms` command as of `now`.
    ///
    /// `args` are the words after the command: an optional supplier key and an optional `when`.
    pub async fn handle(&self, args: &[&str], now: NaiveDateTime) -> Outcome {
        let Some(requested) = args.first() else {
            return Outcome::NoSupplier {
                known: self.registry.key_list(),
            };
        };

        let supplier = match self.registry.lookup(requested) {
            Ok(supplier) => supplier,
            Err(e) => {
                log::debug!("{e}");
                return Outcome::UnrecognizedSupplier {
                    known: self.registry.key_list(),
                };
            }
        };

        let query = date::resolve(now, args.get(1).copied()).unwrap_or_else(|e| {
            // TODO: tell the user their `when` was not understood instead of assuming today
            log::info!("{e}, falling back to today");
            TimeQuery::now(now)
        });

        self.menu_for(supplier, query, now).await
    }

    async fn menu_for(&self, supplier: &Supplier, query: TimeQuery, now: NaiveDateTime) -> Outcome {
        let name = supplier.name();
        let dt = query.dt();
        log::debug!("Checking {:?} hours for {dt}", supplier.schedule());
        if !(supplier.is_open(&dt) || supplier.will_open(&dt)) {
            return Outcome::SupplierClosed { name, query };
        }

        let lines = self.fetcher.fetch_menu(supplier, dt).await;
        if lines.is_empty() {
            return Outcome::MenuUnavailable { name, query };
        }

        // only meaningful for the present, and always about the actual current time
        let serving_now = if !query.refers_to_now() {
            None
        } else if supplier.is_open_for_lunch(&now) {
            Some(Meal::Lunch)
        } else if supplier.is_open_for_dinner(&now) {
            Some(Meal::Dinner)
        } else {
            None
        };

        Outcome::Menu {
            name,
            query,
            lines,
            serving_now,
        }
    }
}
