use super::predicates::{in_range, letters_and_spaces_only, min_length, parse_number};
use super::rules::{self, FLAVOUR_HIGHEST_PRICE, FLAVOUR_LOWEST_PRICE, FLAVOUR_NAME_MIN_LENGTH};
use super::{Validator, Violation};
use crate::data_access::DataAccessError;
use crate::types::{FlavourDraft, Operation};

impl Validator {
    /// Rules for adding or updating a flavour.
    ///
    /// 1. The name must not belong to another flavour. On update the flavour
    ///    being edited is left out of the comparison.
    /// 2. The name needs at least two characters and, only when long enough,
    ///    must consist of letters and spaces.
    /// 3. The price must be a number and, only when it is, lie within
    ///    0.5..=10.
    ///
    /// # Errors
    ///
    /// Returns an error if the current flavours cannot be read.
    pub async fn validate_flavour(
        &self,
        operation: Operation,
        draft: &FlavourDraft,
    ) -> Result<Vec<Violation>, DataAccessError> {
        let mut violations = Vec::new();

        let excluded = match operation {
            Operation::Add => None,
            Operation::Update => draft.id,
        };
        let name_taken = self
            .data
            .flavours()
            .await?
            .iter()
            .filter(|f| Some(f.id) != excluded)
            .any(|f| f.name == draft.name);
        if name_taken {
            violations.push(rules::duplicate_flavour(&draft.name));
        }

        if !min_length(&draft.name, FLAVOUR_NAME_MIN_LENGTH) {
            violations.push(rules::flavour_name_too_short());
        } else if !letters_and_spaces_only(&draft.name) {
            violations.push(rules::flavour_name_not_letters());
        }

        match parse_number(&draft.price) {
            None => violations.push(rules::price_not_a_number()),
            Some(price) if !in_range(price, FLAVOUR_LOWEST_PRICE, FLAVOUR_HIGHEST_PRICE) => {
                violations.push(rules::price_out_of_range());
            }
            Some(_) => {}
        }

        Ok(violations)
    }
}
