/// Rules applied when a new account is created.
#[derive(Debug, Clone, Default)]
pub struct SignUpPolicy {
    /// E-mail addresses that receive the admin role at sign-up.
    pub admin_emails: Vec<String>,
    /// When set, sign-in is refused until the e-mail has been confirmed.
    pub require_email_confirmation: bool,
}

impl SignUpPolicy {
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.trim().to_lowercase() == email.to_lowercase())
    }
}
