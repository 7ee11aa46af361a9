//! Email service for new-order notifications.
//!
//! Uses SMTP via lettre for delivery with Askama templates.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::Order;

/// HTML body of the new-order email.
#[derive(Template)]
#[template(path = "email/order_notification.html")]
struct OrderNotificationHtml<'a> {
    order: &'a Order,
    coupon_code: Option<&'a str>,
    notes: Option<&'a str>,
    admin_url: &'a str,
}

/// Plain text body of the new-order email.
#[derive(Template)]
#[template(path = "email/order_notification.txt")]
struct OrderNotificationText<'a> {
    order: &'a Order,
    coupon_code: Option<&'a str>,
    notes: Option<&'a str>,
    admin_url: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Sends transactional email to the shop owner.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    notify_address: String,
    admin_url: String,
}

impl EmailService {
    /// Create an email service. `base_url` is used to link to the admin
    /// panel.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig, base_url: &str) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            notify_address: config.notify_address.clone(),
            admin_url: format!("{}/admin", base_url.trim_end_matches('/')),
        })
    }

    /// Tell the shop owner about a new order.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to render or send.
    pub async fn send_order_notification(&self, order: &Order) -> Result<(), EmailError> {
        let (text, html) = render_order_notification(order, &self.admin_url)?;
        let subject = format!(
            "নতুন অর্ডার {} - {}",
            order.order_number, order.customer_name
        );

        self.send_multipart_email(&self.notify_address, &subject, &text, &html)
            .await
    }

    /// Send the order notification in the background. Failures are logged.
    pub fn spawn_order_notification(&self, order: Order) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.send_order_notification(&order).await {
                tracing::warn!(
                    error = %e,
                    order_number = %order.order_number,
                    "Failed to send order notification"
                );
            }
        });
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

/// Render the text and HTML bodies of the order notification.
fn render_order_notification(order: &Order, admin_url: &str) -> Result<(String, String), EmailError> {
    let coupon_code = order.coupon_code.as_deref();
    let notes = order.notes.as_deref();

    let text = OrderNotificationText {
        order,
        coupon_code,
        notes,
        admin_url,
    }
    .render()?;
    let html = OrderNotificationHtml {
        order,
        coupon_code,
        notes,
        admin_url,
    }
    .render()?;

    Ok((text, html))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use royal_trust_core::{OrderId, OrderNumber, OrderStatus};

    use super::*;

    fn order() -> Order {
        Order {
            id: OrderId::new(),
            order_number: OrderNumber::from_parts(1_700_000_123_456, 4321),
            customer_name: "Rahim <Uddin>".into(),
            phone: "01711000000".into(),
            address: "Mirpur 10, Dhaka".into(),
            product_id: None,
            product_name: "রয়েল ব্লু পাঞ্জাবি".into(),
            product_category: Some("panjabi".into()),
            color: "রয়েল ব্লু".into(),
            size: "L".into(),
            quantity: 2,
            total_price: Decimal::from(2641),
            delivery_charge: Decimal::from(60),
            coupon_code: Some("EID10".into()),
            discount: Decimal::from(139),
            status: OrderStatus::Pending,
            notes: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_order_notification() {
        let (text, html) = render_order_notification(&order(), "https://shop.example/admin").unwrap();

        assert!(text.contains("RT1234564321"));
        assert!(text.contains("Coupon: EID10"));
        assert!(text.contains("Total: 2641"));
        assert!(!text.contains("Notes:"));

        assert!(html.contains("https://shop.example/admin"));
        // customer input is escaped in the HTML body
        assert!(html.contains("Rahim &#60;Uddin&#62;") || html.contains("Rahim &lt;Uddin&gt;"));
    }

    #[test]
    fn test_render_without_coupon() {
        let mut order = order();
        order.coupon_code = None;
        order.notes = Some("সন্ধ্যার পরে কল করুন".into());

        let (text, _) = render_order_notification(&order, "/admin").unwrap();
        assert!(!text.contains("Coupon:"));
        assert!(text.contains("Notes: সন্ধ্যার পরে কল করুন"));
    }
}
