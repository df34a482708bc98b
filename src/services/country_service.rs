use crate::{dao::models::CountryEntry, state::SharedState};

/// Return the country reference data loaded at boot.
pub fn list_countries(state: &SharedState) -> Vec<CountryEntry> {
    state.countries().to_vec()
}
