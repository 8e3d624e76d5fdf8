//! Remote operations, request families and HTTP methods.
//!
//! These small enums travel inside the request context map that the host hands
//! back with every response, so each has a stable string form.

/// HTTP method of an inventory request.
///
/// Mirrors the host's verb type so the library stays independent of the
/// plugin runtime; the shim converts at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// One of the six exchanges with the inventory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /api/products/{id}`
    FetchById,
    /// `GET /api/products/`
    ListAll,
    /// `POST /api/products/`
    Create,
    /// `PUT /api/products/{id}`
    Update,
    /// `DELETE /api/products/{id}`
    Delete,
    /// `POST /api/products_test/`
    CreateRandom,
}

impl Operation {
    /// Stable identifier used in the request context map.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchById => "fetch_by_id",
            Self::ListAll => "list_all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::CreateRandom => "create_random",
        }
    }

    /// Parses the identifier produced by [`Operation::as_str`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match raw {
            "fetch_by_id" => Self::FetchById,
            "list_all" => Self::ListAll,
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "create_random" => Self::CreateRandom,
            _ => return None,
        })
    }

    /// Prefix for the diagnostic logged when this operation fails.
    #[must_use]
    pub const fn failure_label(self) -> &'static str {
        match self {
            Self::FetchById => "Error fetching product by ID",
            Self::ListAll => "Error fetching products",
            Self::Create => "Error creating product",
            Self::Update => "Error updating product",
            Self::Delete => "Error deleting product",
            Self::CreateRandom => "Error creating random product",
        }
    }
}

/// Group of requests whose responses overwrite the same piece of state.
///
/// Only the most recently issued request of a family may overwrite that state;
/// older responses arriving later are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestFamily {
    /// Listing and searching; both replace the result list.
    Results,
    /// Fetch-by-id issued from the update form; loads the draft only.
    Hydrate,
    Create,
    Update,
    Delete,
    Random,
}

impl RequestFamily {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Results => "results",
            Self::Hydrate => "hydrate",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match raw {
            "results" => Self::Results,
            "hydrate" => Self::Hydrate,
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "random" => Self::Random,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_round_trip() {
        for op in [
            Operation::FetchById,
            Operation::ListAll,
            Operation::Create,
            Operation::Update,
            Operation::Delete,
            Operation::CreateRandom,
        ] {
            assert_eq!(Operation::parse(op.as_str()), Some(op));
        }
        assert_eq!(Operation::parse("patch"), None);
    }

    #[test]
    fn family_names_round_trip() {
        for family in [
            RequestFamily::Results,
            RequestFamily::Hydrate,
            RequestFamily::Create,
            RequestFamily::Update,
            RequestFamily::Delete,
            RequestFamily::Random,
        ] {
            assert_eq!(RequestFamily::parse(family.as_str()), Some(family));
        }
    }
}
