use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, Entity, IngredientId, ProductId, ValueObject};

/// EAN barcode: 8 or 13 digits, as read off a scanner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ean(String);

impl Ean {
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        if !(code.len() == 8 || code.len() == 13) {
            return Err(DomainError::validation("EAN must be 8 or 13 digits"));
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation("EAN may contain digits only"));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Ean {}

impl core::fmt::Display for Ean {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ean {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ean> for String {
    fn from(value: Ean) -> Self {
        value.0
    }
}

/// One purchasable rendition of an ingredient: a brand's package, identified
/// by its barcode when it has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub ingredient_id: IngredientId,
    pub ean: Option<Ean>,
    pub name: String,
    /// How much one full package holds, in the ingredient's unit.
    pub package_amount: f64,
    /// Dash products ("a dash of nutmeg") are not meaningfully measured.
    pub dash: bool,
    /// Typical shelf life, used to default the expiration date on intake.
    pub est_expiration_days: Option<u32>,
}

impl Product {
    pub fn new(
        id: ProductId,
        ingredient_id: IngredientId,
        ean: Option<Ean>,
        name: impl Into<String>,
        package_amount: f64,
        dash: bool,
        est_expiration_days: Option<u32>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !package_amount.is_finite() || package_amount < 0.0 {
            return Err(DomainError::validation(
                "package amount must be a non-negative number",
            ));
        }
        Ok(Self {
            id,
            ingredient_id,
            ean,
            name,
            package_amount,
            dash,
            est_expiration_days,
        })
    }

    /// Default expiration date for stock taken in on `from`.
    pub fn estimated_expiration(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.est_expiration_days
            .and_then(|days| from.checked_add_days(Days::new(u64::from(days))))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Allow-listed update for a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub ingredient_id: Option<IngredientId>,
    /// `Some(None)` removes the barcode.
    pub ean: Option<Option<Ean>>,
    pub name: Option<String>,
    pub package_amount: Option<f64>,
    pub dash: Option<bool>,
    /// `Some(None)` removes the shelf-life estimate.
    pub est_expiration_days: Option<Option<u32>>,
}

impl ProductPatch {
    pub fn apply(&self, product: &mut Product) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }
        if let Some(package_amount) = self.package_amount {
            if !package_amount.is_finite() || package_amount < 0.0 {
                return Err(DomainError::validation(
                    "package amount must be a non-negative number",
                ));
            }
        }

        if let Some(ingredient_id) = self.ingredient_id {
            product.ingredient_id = ingredient_id;
        }
        if let Some(ean) = &self.ean {
            product.ean = ean.clone();
        }
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(package_amount) = self.package_amount {
            product.package_amount = package_amount;
        }
        if let Some(dash) = self.dash {
            product.dash = dash;
        }
        if let Some(est_expiration_days) = self.est_expiration_days {
            product.est_expiration_days = est_expiration_days;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(est_expiration_days: Option<u32>) -> Product {
        Product::new(
            ProductId::new(),
            IngredientId::new(),
            Some(Ean::new("5901234123457").unwrap()),
            "UHT milk 1l",
            1000.0,
            false,
            est_expiration_days,
        )
        .unwrap()
    }

    #[test]
    fn ean_accepts_8_and_13_digit_codes() {
        assert!(Ean::new("96385074").is_ok());
        assert!(Ean::new("5901234123457").is_ok());
    }

    #[test]
    fn ean_rejects_wrong_lengths_and_non_digits() {
        assert!(Ean::new("1234").is_err());
        assert!(Ean::new("123456789012").is_err());
        assert!(Ean::new("59012341234X7").is_err());
        assert!(Ean::new("").is_err());
    }

    #[test]
    fn estimated_expiration_adds_the_shelf_life() {
        let p = product(Some(7));
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            p.estimated_expiration(from),
            NaiveDate::from_ymd_opt(2024, 3, 8)
        );
    }

    #[test]
    fn estimated_expiration_is_none_without_an_estimate() {
        let p = product(None);
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(p.estimated_expiration(from), None);
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = Product::new(
            ProductId::new(),
            IngredientId::new(),
            None,
            "  ",
            1.0,
            false,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn patch_can_remove_the_barcode() {
        let mut p = product(None);
        let patch = ProductPatch {
            ean: Some(None),
            ..Default::default()
        };
        patch.apply(&mut p).unwrap();
        assert_eq!(p.ean, None);
    }

    #[test]
    fn patch_rejects_invalid_package_amount() {
        let mut p = product(None);
        let patch = ProductPatch {
            package_amount: Some(f64::NAN),
            ..Default::default()
        };
        assert!(patch.apply(&mut p).is_err());
        assert_eq!(p.package_amount, 1000.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn digit_strings_of_valid_length_parse(code in "[0-9]{13}|[0-9]{8}") {
                prop_assert!(Ean::new(code).is_ok());
            }

            #[test]
            fn other_lengths_are_rejected(code in "[0-9]{1,7}|[0-9]{9,12}|[0-9]{14,20}") {
                prop_assert!(Ean::new(code).is_err());
            }
        }
    }
}
