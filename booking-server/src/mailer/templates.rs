//! Email templates
//!
//! Plain HTML built with format!, styled inline so the messages render
//! the same across webmail clients.

use shared::models::Booking;

use crate::mailer::Email;

fn layout(title: &str, inner: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
{inner}
    </div>
</body>
</html>
"#
    )
}

fn button(href: &str, label: &str, color: &str) -> String {
    format!(
        r#"<p style="margin: 30px 0;">
            <a href="{href}"
               style="display: inline-block; background-color: {color}; color: white; padding: 12px 24px; text-decoration: none; border-radius: 4px;">
                {label}
            </a>
        </p>
        <p style="color: #666; font-size: 12px;">
            Or copy and paste this link into your browser:<br>
            {href}
        </p>"#
    )
}

/// Account verification link sent right after signup.
pub fn verification_email(to: &str, base_url: &str, token: &str) -> Email {
    let link = format!("{base_url}/verify-email?token={token}");
    let inner = format!(
        r#"        <h2 style="color: #2563eb;">Verify your email address</h2>
        <p>Welcome! Please verify your email address by clicking the link below:</p>
        {button}
        <p style="color: #666; font-size: 14px;">
            If you didn't create an account, you can safely ignore this email.
        </p>"#,
        button = button(&link, "Verify Email", "#2563eb")
    );

    Email {
        to: to.to_string(),
        subject: "Verify your email address".to_string(),
        html: layout("Verify your email address", &inner),
    }
}

/// Password reset link, for both guest and admin accounts.
pub fn password_reset_email(to: &str, base_url: &str, token: &str, admin: bool) -> Email {
    let path = if admin { "/admin/reset-password" } else { "/reset-password" };
    let link = format!("{base_url}{path}?token={token}");
    let inner = format!(
        r#"        <h2 style="color: #dc2626;">Reset your password</h2>
        <p>Click the link below to reset your password. The link expires in 1 hour.</p>
        {button}
        <p style="color: #666; font-size: 14px;">
            If you didn't request this password reset, please ignore this email. Your password will not be changed.
        </p>"#,
        button = button(&link, "Reset Password", "#dc2626")
    );

    Email {
        to: to.to_string(),
        subject: "Reset your password".to_string(),
        html: layout("Reset your password", &inner),
    }
}

/// One-time code gating the final booking step.
pub fn otp_email(to: &str, code: &str, ttl_minutes: i64) -> Email {
    let inner = format!(
        r#"        <h2 style="color: #2563eb;">Your booking confirmation code</h2>
        <p>Enter this code to confirm your booking. It expires in {ttl_minutes} minutes.</p>
        <p style="font-size: 32px; letter-spacing: 8px; font-weight: bold; margin: 30px 0;">{code}</p>
        <p style="color: #666; font-size: 14px;">
            If you weren't completing a booking, you can safely ignore this email.
        </p>"#
    );

    Email {
        to: to.to_string(),
        subject: "Your booking confirmation code".to_string(),
        html: layout("Your booking confirmation code", &inner),
    }
}

/// Receipt sent after a booking is written.
pub fn booking_confirmation_email(to: &str, booking: &Booking) -> Email {
    let inner = format!(
        r#"        <h2 style="color: #16a34a;">Booking received</h2>
        <p>Your booking request is in. We'll confirm it shortly.</p>
        <table style="border-collapse: collapse; width: 100%;">
            <tr><td style="padding: 6px 0; color: #666;">Reference</td><td>{id}</td></tr>
            <tr><td style="padding: 6px 0; color: #666;">Date</td><td>{date}</td></tr>
            <tr><td style="padding: 6px 0; color: #666;">Guests</td><td>{guests}</td></tr>
            <tr><td style="padding: 6px 0; color: #666;">Base fare</td><td>{base:.2}</td></tr>
            <tr><td style="padding: 6px 0; color: #666;">Extra charges</td><td>{extras:.2}</td></tr>
            <tr><td style="padding: 6px 0; font-weight: bold;">Total</td><td style="font-weight: bold;">{total:.2}</td></tr>
        </table>"#,
        id = booking.id,
        date = booking.event_date,
        guests = booking.guest_count,
        base = booking.base_fare,
        extras = booking.extra_charges,
        total = booking.total_fare,
    );

    Email {
        to: to.to_string(),
        subject: format!("Booking received for {}", booking.event_date),
        html: layout("Booking received", &inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_link_carries_the_token() {
        let email = verification_email("a@example.com", "https://book.example.com", "tok123");
        assert!(email.html.contains("https://book.example.com/verify-email?token=tok123"));
        assert_eq!(email.to, "a@example.com");
    }

    #[test]
    fn reset_links_differ_for_admin_and_guest() {
        let guest = password_reset_email("a@example.com", "https://x", "t", false);
        let admin = password_reset_email("a@example.com", "https://x", "t", true);
        assert!(guest.html.contains("https://x/reset-password?token=t"));
        assert!(admin.html.contains("https://x/admin/reset-password?token=t"));
    }

    #[test]
    fn otp_email_shows_the_code() {
        let email = otp_email("a@example.com", "123456", 10);
        assert!(email.html.contains("123456"));
        assert!(email.html.contains("10 minutes"));
    }
}
