//! View states and what each one renders to.

use linkedin_signin_identity::IdentityProfile;
use std::fmt;

/// Where the client stands with respect to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nobody is signed in, or the gateway said so.
    #[default]
    Idle,
    /// A lookup is in flight.
    Loading,
    /// The gateway returned this profile.
    Authed(IdentityProfile),
    /// The lookup itself failed.
    Error(String),
}

/// A transient message shown above the sign-in entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Loading,
    Error(String),
}

/// The profile card for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub picture: Option<String>,
    pub display_name: String,
    pub email: Option<String>,
}

/// What the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The "Sign in with LinkedIn" entry point.
    SignIn { notice: Option<Notice> },
    /// The profile card with a logout action.
    Profile(ProfileCard),
}

/// Fallback when the profile carries no usable name.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Signed in";

/// Maps a view state to the screen for it.
#[must_use]
pub fn render(state: &ViewState) -> Screen {
    match state {
        ViewState::Idle => Screen::SignIn { notice: None },
        ViewState::Loading => Screen::SignIn {
            notice: Some(Notice::Loading),
        },
        ViewState::Error(message) => Screen::SignIn {
            notice: Some(Notice::Error(message.clone())),
        },
        ViewState::Authed(profile) => Screen::Profile(ProfileCard {
            picture: profile.picture.clone().filter(|p| !p.is_empty()),
            display_name: profile
                .display_name()
                .unwrap_or(ANONYMOUS_DISPLAY_NAME)
                .to_string(),
            email: profile.email.clone().filter(|e| !e.is_empty()),
        }),
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignIn { notice } => {
                match notice {
                    Some(Notice::Loading) => writeln!(f, "Loading…")?,
                    Some(Notice::Error(message)) => writeln!(f, "Error: {message}")?,
                    None => {}
                }
                write!(f, "[Sign in with LinkedIn]")
            }
            Self::Profile(card) => {
                if let Some(picture) = &card.picture {
                    writeln!(f, "Picture: {picture}")?;
                }
                writeln!(f, "{}", card.display_name)?;
                if let Some(email) = &card.email {
                    writeln!(f, "{email}")?;
                }
                write!(f, "[Log out]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> IdentityProfile {
        IdentityProfile {
            name: Some("John Doe".to_string()),
            email: Some("doe@email.com".to_string()),
            picture: Some("https://media.licdn.com/photo.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn idle_loading_and_error_show_sign_in() {
        assert_eq!(render(&ViewState::Idle), Screen::SignIn { notice: None });
        assert_eq!(
            render(&ViewState::Loading),
            Screen::SignIn {
                notice: Some(Notice::Loading)
            }
        );
        assert_eq!(
            render(&ViewState::Error("offline".to_string())),
            Screen::SignIn {
                notice: Some(Notice::Error("offline".to_string()))
            }
        );
    }

    #[test]
    fn authed_shows_profile_card() {
        let screen = render(&ViewState::Authed(profile()));
        assert_eq!(
            screen,
            Screen::Profile(ProfileCard {
                picture: Some("https://media.licdn.com/photo.jpg".to_string()),
                display_name: "John Doe".to_string(),
                email: Some("doe@email.com".to_string()),
            })
        );
    }

    #[test]
    fn nameless_profile_falls_back() {
        let screen = render(&ViewState::Authed(IdentityProfile::default()));
        let Screen::Profile(card) = screen else {
            panic!("expected a profile card");
        };
        assert_eq!(card.display_name, ANONYMOUS_DISPLAY_NAME);
        assert_eq!(card.picture, None);
        assert_eq!(card.email, None);
    }

    #[test]
    fn screens_render_as_text() {
        let text = render(&ViewState::Error("offline".to_string())).to_string();
        assert_eq!(text, "Error: offline\n[Sign in with LinkedIn]");

        let text = render(&ViewState::Authed(profile())).to_string();
        assert_eq!(
            text,
            "Picture: https://media.licdn.com/photo.jpg\nJohn Doe\ndoe@email.com\n[Log out]"
        );
    }
}
