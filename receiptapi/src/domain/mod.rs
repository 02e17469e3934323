pub mod prelude {
    pub use super::{
        points::{compute_points, PointsBreakdown, ScoringError},
        receipts::{PurchaseItem, Receipt},
    };
}

pub mod points;

pub mod receipts {
    use chrono::{NaiveDate, NaiveTime};
    use regex::Regex;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize};
    use std::sync::LazyLock;

    /// Format of `purchaseDate` on the wire (ex. "2022-01-01").
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format of `purchaseTime` on the wire, 24h clock (ex. "14:33").
    pub const TIME_FORMAT: &str = "%H:%M";

    // chrono accepts unpadded fields, so the zero-padded shape is checked first
    static DATE_SHAPE: LazyLock<Result<Regex, regex::Error>> =
        LazyLock::new(|| Regex::new("^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));
    static TIME_SHAPE: LazyLock<Result<Regex, regex::Error>> =
        LazyLock::new(|| Regex::new("^[0-9]{1,2}:[0-9]{2}$"));

    /// A single line of a receipt.
    ///
    #[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
    #[serde(rename_all = "camelCase", default)]
    pub struct PurchaseItem {
        #[serde(deserialize_with = "null_as_default")]
        pub short_description: String,
        #[serde(with = "decimal_string")]
        pub price: Decimal,
    }

    /// Domain model for a submitted purchase Receipt.
    ///
    /// Amounts travel as JSON strings ("35.35") and are kept as fixed-point
    /// decimals. Missing or null fields decode to their zero value, so only
    /// malformed JSON or malformed amounts are rejected.
    ///
    #[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
    #[serde(rename_all = "camelCase", default)]
    pub struct Receipt {
        #[serde(deserialize_with = "null_as_default")]
        pub retailer: String,
        pub purchase_date: Option<String>,
        pub purchase_time: Option<String>,
        #[serde(deserialize_with = "null_as_default")]
        pub items: Vec<PurchaseItem>,
        #[serde(with = "decimal_string")]
        pub total: Decimal,
    }

    impl Receipt {
        /// The purchase date, if present and a valid `YYYY-MM-DD` calendar date.
        pub fn purchase_date(&self) -> Option<NaiveDate> {
            let raw = self.purchase_date.as_deref()?;
            if !has_shape(&DATE_SHAPE, raw) {
                return None;
            }
            NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
        }

        /// The purchase time, if present and a valid 24h clock time with a
        /// two-digit minute.
        pub fn purchase_time(&self) -> Option<NaiveTime> {
            let raw = self.purchase_time.as_deref()?;
            if !has_shape(&TIME_SHAPE, raw) {
                return None;
            }
            NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
        }
    }

    fn has_shape(shape: &LazyLock<Result<Regex, regex::Error>>, raw: &str) -> bool {
        shape
            .as_ref()
            .map(|regex| regex.is_match(raw))
            .unwrap_or(false)
    }

    /// Decodes JSON `null` as the zero value of the field.
    fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// (De)serializes a Decimal as a JSON string. `null` decodes as zero.
    mod decimal_string {
        use rust_decimal::Decimal;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(value)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
            let Some(raw) = Option::<String>::deserialize(deserializer)? else {
                return Ok(Decimal::ZERO);
            };
            raw.parse::<Decimal>()
                .map_err(|e| de::Error::custom(format!("invalid decimal amount {raw:?}: {e}")))
        }
    }

}
