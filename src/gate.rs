//! Auth/profile gate
//!
//! Before any protected command runs, the gate walks a short state machine:
//!
//! ```text
//! Authenticating -> CheckingProfile -> CreatingProfile -> Ready
//!        \                   \_______________________/^
//!         \-> RedirectToLogin
//! ```
//!
//! `Ready` and `RedirectToLogin` are terminal. Errors from the auth provider or
//! the profile store stop the gate and are returned to the caller.

use std::fmt;

use log::{debug, info};

use crate::auth::{AuthProvider, AuthUser};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::UserProfile;
use crate::storage::ProfileStore;

/// States of the profile gate
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    /// Waiting for the auth provider to report a session
    Authenticating,
    /// Signed in; looking up the profile record
    CheckingProfile(AuthUser),
    /// No profile yet; creating one with default preferences
    CreatingProfile(AuthUser),
    /// Profile available; protected views may render
    Ready(UserProfile),
    /// No session; the user has to sign in
    RedirectToLogin,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::RedirectToLogin)
    }

    /// Short machine-friendly name of the state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Authenticating => "authenticating",
            Self::CheckingProfile(_) => "checking_profile",
            Self::CreatingProfile(_) => "creating_profile",
            Self::Ready(_) => "ready",
            Self::RedirectToLogin => "redirect_to_login",
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticating => write!(f, "Authenticating..."),
            Self::CheckingProfile(user) => write!(f, "Checking profile for {}...", user.email),
            Self::CreatingProfile(user) => write!(f, "Creating profile for {}...", user.email),
            Self::Ready(profile) => write!(f, "Ready ({})", profile.name),
            Self::RedirectToLogin => write!(f, "Not signed in"),
        }
    }
}

/// Drives the gate state machine over an auth provider and a profile store
pub struct ProfileGate<'a, A: AuthProvider + ?Sized, P: ProfileStore + ?Sized> {
    auth: &'a A,
    store: &'a P,
    state: GateState,
    history: Vec<GateState>,
}

impl<'a, A: AuthProvider + ?Sized, P: ProfileStore + ?Sized> ProfileGate<'a, A, P> {
    pub fn new(auth: &'a A, store: &'a P) -> Self {
        Self {
            auth,
            store,
            state: GateState::Authenticating,
            history: vec![GateState::Authenticating],
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Every state visited so far, starting with `Authenticating`
    pub fn history(&self) -> &[GateState] {
        &self.history
    }

    /// Advance one transition; a terminal state stays where it is
    pub fn step(&mut self) -> SpendwiseResult<&GateState> {
        let next = match &self.state {
            GateState::Authenticating => match self.auth.current_user()? {
                Some(user) => GateState::CheckingProfile(user),
                None => GateState::RedirectToLogin,
            },
            GateState::CheckingProfile(user) => match self.store.get_profile(user.uid)? {
                Some(profile) => GateState::Ready(profile),
                None => GateState::CreatingProfile(user.clone()),
            },
            GateState::CreatingProfile(user) => {
                let profile = UserProfile::new(user.uid, &user.email, &user.display_name);
                self.store.create_profile(&profile)?;
                info!("created profile for {}", user.uid);
                GateState::Ready(profile)
            }
            GateState::Ready(_) | GateState::RedirectToLogin => return Ok(&self.state),
        };

        debug!("profile gate: {} -> {}", self.state.name(), next.name());
        self.history.push(next.clone());
        self.state = next;
        Ok(&self.state)
    }

    /// Step until a terminal state is reached and return it
    pub fn run(mut self) -> SpendwiseResult<GateState> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        info!("profile gate finished in state {}", self.state.name());
        Ok(self.state)
    }
}

/// Run the gate and return the ready profile, or an auth error if signed out
pub fn require_profile<A, P>(auth: &A, store: &P) -> SpendwiseResult<UserProfile>
where
    A: AuthProvider + ?Sized,
    P: ProfileStore + ?Sized,
{
    match ProfileGate::new(auth, store).run()? {
        GateState::Ready(profile) => Ok(profile),
        GateState::RedirectToLogin => Err(SpendwiseError::Auth(
            "Not signed in. Run 'spendwise auth login' or 'spendwise auth signup' first".into(),
        )),
        other => Err(SpendwiseError::Gate(format!(
            "Gate stopped in non-terminal state {}",
            other.name()
        ))),
    }
}
