//! The lookup form: raw city input plus the validation message shown beside it.

use crate::{
    model::Query,
    router::{Navigation, NavigationState, Route},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Input was blank; the form error is set and nothing navigates.
    Invalid,
    Navigate(Navigation),
}

#[derive(Debug, Default)]
pub struct LookupForm {
    input: String,
    error: Option<&'static str>,
}

impl LookupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn submit(&mut self) -> FormOutcome {
        match Query::parse(&self.input) {
            Ok(query) => {
                self.error = None;
                FormOutcome::Navigate(Navigation {
                    route: Route::Weather,
                    state: NavigationState::with_city(query.into_city()),
                })
            }
            Err(err) => {
                self.error = err.user_message();
                FormOutcome::Invalid
            }
        }
    }
}
