//! Field-level form validation.
//!
//! Validators run before anything is sent to the backend and collect every
//! failing field rather than stopping at the first one.
//!
//! [`EventDraft::validate`] backs the admin editor. [`ContactForm`],
//! [`DonationForm`] and [`BookingForm`] carry the rules for the public
//! site's contact, donation and booking forms, which are not part of the
//! terminal client.

use crate::record::EventDraft;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid regex"));

/// Failing fields and their messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

// ============================================================================
// FIELD RULES
// ============================================================================

fn required(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, message);
        return false;
    }
    true
}

fn email(errors: &mut ValidationErrors, value: &str) {
    if value.trim().is_empty() || !EMAIL_RE.is_match(value) {
        errors.add("email", "Valid email is required");
    }
}

fn mobile(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !MOBILE_RE.is_match(value.trim()) {
        errors.add(field, "Valid 10-digit mobile number is required");
    }
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

// ============================================================================
// EVENT EDITOR
// ============================================================================

impl EventDraft {
    /// Validate editor input. New events may not be dated before `today`;
    /// existing events keep whatever date they already have.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if required(&mut errors, "title", &self.title, "Title is required") {
            match char_len(&self.title) {
                0..=2 => errors.add("title", "Title must be at least 3 characters"),
                101.. => errors.add("title", "Title must be less than 100 characters"),
                _ => {}
            }
        }

        if required(
            &mut errors,
            "summary",
            &self.summary,
            "Short description is required",
        ) {
            match char_len(&self.summary) {
                0..=9 => errors.add("summary", "Short description must be at least 10 characters"),
                251.. => errors.add(
                    "summary",
                    "Short description must be less than 250 characters",
                ),
                _ => {}
            }
        }

        if required(&mut errors, "date", &self.date, "Date is required") {
            match parse_date(&self.date) {
                None => errors.add("date", "Date must be in YYYY-MM-DD form"),
                Some(date) if !self.is_update() && date < today => {
                    errors.add("date", "Date cannot be in the past")
                }
                Some(_) => {}
            }
        }

        if required(&mut errors, "location", &self.location, "Location is required")
            && char_len(&self.location) < 3
        {
            errors.add("location", "Location must be at least 3 characters");
        }

        errors.into_result()
    }
}

// ============================================================================
// PUBLIC FORMS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "name", &self.name, "Name is required");
        email(&mut errors, &self.email);
        mobile(&mut errors, "mobile", &self.mobile);
        required(&mut errors, "subject", &self.subject, "Please select a subject");
        required(&mut errors, "message", &self.message, "Message cannot be empty");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub amount: String,
}

impl DonationForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "name", &self.name, "Name is required");
        email(&mut errors, &self.email);
        mobile(&mut errors, "phone", &self.phone);
        match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => {}
            _ => errors.add("amount", "Enter a donation amount greater than zero"),
        }
        errors.into_result()
    }
}

/// Dhaja (temple flag) booking request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub date: String,
    pub source: String,
    pub agree: bool,
}

impl BookingForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "name", &self.name, "Name is required");
        if required(&mut errors, "email", &self.email, "Email is required")
            && !EMAIL_RE.is_match(&self.email)
        {
            errors.add("email", "Invalid email format");
        }
        if required(&mut errors, "mobile", &self.mobile, "Mobile number is required")
            && !MOBILE_RE.is_match(self.mobile.trim())
        {
            errors.add("mobile", "Invalid mobile number");
        }
        required(&mut errors, "address", &self.address, "Address is required");
        required(&mut errors, "date", &self.date, "Date is required");
        required(&mut errors, "source", &self.source, "Source is required");
        if !self.agree {
            errors.add("agree", "You must accept the terms and conditions");
        }
        errors.into_result()
    }
}
