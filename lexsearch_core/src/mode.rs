use serde::{Deserialize, Serialize};

/// Which form the auth modal is showing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalMode {
    /// Log into an existing account.
    #[default]
    Login,

    /// Create a new account.
    Register,
}

impl ModalMode {
    /// The mode the switch link takes you to.
    pub fn opposite(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Heading shown at the top of the modal.
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Registration",
        }
    }

    /// Label for the submit button.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Create Account",
        }
    }

    /// Text shown before the switch link.
    pub fn switch_prompt(self) -> &'static str {
        match self {
            Self::Login => "Create An Account Today:",
            Self::Register => "Already have an account?",
        }
    }

    /// The switch link itself. Names the mode you'd switch to.
    pub fn switch_label(self) -> &'static str {
        self.opposite().title_short()
    }

    /// Short name for the mode, as used on links.
    fn title_short(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    /// The inputs this mode shows, in display order. Registration puts its
    /// own fields ahead of the shared email and password.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Login => &[Field::Email, Field::Password],
            Self::Register => &[
                Field::Name,
                Field::DateOfBirth,
                Field::Email,
                Field::Password,
            ],
        }
    }
}

/// An input in the auth modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Full name (registration only)
    Name,

    /// Date of birth (registration only)
    DateOfBirth,

    /// Email address
    Email,

    /// Password (masked)
    Password,
}

impl Field {
    /// Element ID for the input.
    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "reg-name",
            Self::DateOfBirth => "reg-dob",
            Self::Email => "login-email",
            Self::Password => "login-pwd",
        }
    }

    /// Form name for the input.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DateOfBirth => "dob",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    /// HTML input type.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Name => "text",
            Self::DateOfBirth => "date",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    /// Placeholder / label text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::DateOfBirth => "Date Of Birth",
            Self::Email => "Email Address",
            Self::Password => "Password",
        }
    }

    /// Should the value be hidden while typing?
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_link_names_the_other_mode() {
        assert_eq!(ModalMode::Login.switch_label(), "Register");
        assert_eq!(ModalMode::Register.switch_label(), "Login");
    }

    #[test]
    fn registration_prepends_its_fields() {
        let login = ModalMode::Login.fields();
        let register = ModalMode::Register.fields();

        assert_eq!(&register[register.len() - login.len()..], login);
        assert_eq!(&register[..2], &[Field::Name, Field::DateOfBirth]);
    }

    #[test]
    fn opposite_round_trips() {
        for mode in [ModalMode::Login, ModalMode::Register] {
            assert_eq!(mode.opposite().opposite(), mode);
            assert_ne!(mode.opposite(), mode);
        }
    }
}
