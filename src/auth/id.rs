//! Strongly typed identifiers enforced across the session domain.

// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 256;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				Self::try_from(value.into())
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

def_id! { SubjectId, "Stable identifier the provider assigns to an end user (OIDC `sub`).", "Subject" }
def_id! { ProviderId, "Identifier for an identity-provider descriptor.", "Provider" }

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (subject, provider).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (subject, provider).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (subject, provider).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empties() {
		assert!(SubjectId::new("").is_err());
		assert!(SubjectId::new("auth0|123 456").is_err());
		assert!(ProviderId::new(" leading").is_err());

		let subject = SubjectId::new("auth0|5cc7242513f60f11c4e58a71")
			.expect("Subject fixture should be valid.");

		assert_eq!(subject.as_ref(), "auth0|5cc7242513f60f11c4e58a71");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let payload = "\"google-oauth2|117\"";
		let subject: SubjectId =
			serde_json::from_str(payload).expect("Subject should deserialize successfully.");

		assert_eq!(subject.as_ref(), "google-oauth2|117");
		assert!(serde_json::from_str::<SubjectId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<ProviderId>("\"\"").is_err());
	}

	#[test]
	fn length_limit_is_inclusive() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		SubjectId::new(exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(matches!(
			SubjectId::new(too_long),
			Err(IdentifierError::TooLong { kind: "Subject", .. })
		));
	}
}
