//! Categorical fields stored as short code strings.
//!
//! Every enum here maps one-to-one onto the code set accepted by its column
//! (see the CHECK constraints in `migrations/`). Codes are what is stored and
//! serialized; labels are for display only.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One entry of a choice list handed to renderers for filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} code '{code}'")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub code: String,
}

/// Reads a code column from a hand-decoded join row.
pub(crate) fn decode_choice<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = UnknownChoice>,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|e: UnknownChoice| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

macro_rules! choices {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn choices() -> Vec<Choice> {
                Self::ALL
                    .iter()
                    .map(|c| Choice { code: c.code(), label: c.label() })
                    .collect()
            }

            /// Label for a raw code, or the code itself when it is not recognised.
            pub fn display_for(code: &str) -> String {
                code.parse::<Self>()
                    .map(|c| c.label().to_string())
                    .unwrap_or_else(|_| code.to_string())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    _ => Err(UnknownChoice {
                        kind: stringify!($name),
                        code: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownChoice;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

choices! {
    Country {
        Germany => ("GER", "Germany"),
        Japan => ("JPN", "Japan"),
        UnitedStates => ("USA", "United States"),
        SouthKorea => ("KOR", "South Korea"),
        France => ("FRA", "France"),
        Italy => ("ITA", "Italy"),
        UnitedKingdom => ("UK", "United Kingdom"),
    }
}

choices! {
    BodyType {
        Sedan => ("SEDAN", "Sedan"),
        Hatchback => ("HATCHBACK", "Hatchback"),
        Suv => ("SUV", "SUV"),
        Coupe => ("COUPE", "Coupe"),
        Convertible => ("CONVERTIBLE", "Convertible"),
        Wagon => ("WAGON", "Wagon"),
        Pickup => ("PICKUP", "Pickup"),
    }
}

choices! {
    FuelType {
        Petrol => ("PETROL", "Petrol"),
        Diesel => ("DIESEL", "Diesel"),
        Electric => ("ELECTRIC", "Electric"),
        Hybrid => ("HYBRID", "Hybrid"),
        Hydrogen => ("HYDROGEN", "Hydrogen"),
    }
}

choices! {
    Gender {
        Male => ("M", "Male"),
        Female => ("F", "Female"),
        Other => ("O", "Other"),
    }
}

choices! {
    ServiceType {
        OilChange => ("OIL_CHANGE", "Oil change"),
        BrakeRepair => ("BRAKE_REPAIR", "Brake repair"),
        TireChange => ("TIRE_CHANGE", "Tire change"),
        EngineRepair => ("ENGINE_REPAIR", "Engine repair"),
        Transmission => ("TRANSMISSION", "Transmission repair"),
        Electrical => ("ELECTRICAL", "Electrical"),
        BodyRepair => ("BODY_REPAIR", "Body repair"),
        Maintenance => ("MAINTENANCE", "Scheduled maintenance"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_tables_have_expected_sizes() {
        assert_eq!(Country::ALL.len(), 7);
        assert_eq!(BodyType::ALL.len(), 7);
        assert_eq!(FuelType::ALL.len(), 5);
        assert_eq!(Gender::ALL.len(), 3);
        assert_eq!(ServiceType::ALL.len(), 8);
    }

    #[test]
    fn codes_parse_back_to_their_variant() {
        for c in Country::ALL {
            assert_eq!(c.code().parse::<Country>().unwrap(), *c);
        }
        for s in ServiceType::ALL {
            assert_eq!(s.code().parse::<ServiceType>().unwrap(), *s);
        }
    }

    #[test]
    fn display_for_falls_back_to_raw_code() {
        assert_eq!(BodyType::display_for("SUV"), "SUV");
        assert_eq!(BodyType::display_for("SEDAN"), "Sedan");
        assert_eq!(BodyType::display_for("LIMO"), "LIMO");
        assert_eq!(Country::display_for("JPN"), "Japan");
        assert_eq!(Country::display_for("jpn"), "jpn");
    }

    #[test]
    fn serializes_as_code_and_rejects_unknown_codes() {
        assert_eq!(serde_json::to_string(&Country::UnitedKingdom).unwrap(), "\"UK\"");
        let fuel: FuelType = serde_json::from_str("\"HYBRID\"").unwrap();
        assert_eq!(fuel, FuelType::Hybrid);

        let err = serde_json::from_str::<Gender>("\"X\"").unwrap_err();
        assert!(err.to_string().contains("unknown Gender code 'X'"));
    }

    #[test]
    fn choices_keep_declaration_order() {
        let codes: Vec<_> = FuelType::choices().into_iter().map(|c| c.code).collect();
        assert_eq!(codes, ["PETROL", "DIESEL", "ELECTRIC", "HYBRID", "HYDROGEN"]);
    }
}
