//! Phone validity checks applied after normalization.

use tracing::debug;

use crate::types::NormalizedPhone;

/// Trait for numbering-plan validators
pub trait PhoneValidator: Send + Sync {
    /// Check if the normalized number is a valid, assigned number
    fn is_valid(&self, phone: &NormalizedPhone) -> bool;
}

/// Accepts every normalized number
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllValidator;

impl PhoneValidator for AcceptAllValidator {
    fn is_valid(&self, _phone: &NormalizedPhone) -> bool {
        true
    }
}

/// Validation against libphonenumber metadata.
///
/// Country code 7 is shared by Russia and Kazakhstan; the number is checked
/// against whichever region its national prefix belongs to, so `+7 701...`
/// (Kazakh mobile) is valid and unassigned ranges such as `+7 300...` are not.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberingPlanValidator;

impl PhoneValidator for NumberingPlanValidator {
    fn is_valid(&self, phone: &NormalizedPhone) -> bool {
        match phonenumber::parse(None, phone.as_str()) {
            Ok(number) => phonenumber::is_valid(&number),
            Err(e) => {
                debug!(phone = %phone, error = %e, "phone number did not parse");
                false
            }
        }
    }
}
