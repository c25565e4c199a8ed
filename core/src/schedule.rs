//! Verification schedule computations.
//!
//! Pure functions over the data model, no I/O. The server-supplied
//! `next_verification_date` is authoritative; [`compute_next_verification`]
//! exists to fill the gap when the server omits it, and [`derive_status`]
//! gives the UI a local timeliness hint when the server's `status` text is
//! unavailable.

use chrono::{Months, NaiveDate};

use crate::types::Equipment;

/// Default look-ahead window for [`VerificationStatus::DueSoon`], in days.
pub const DEFAULT_DUE_SOON_WINDOW_DAYS: i64 = 30;

/// Verification timeliness of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Never verified, or no next date can be derived.
    NoSchedule,
    /// The next verification date is strictly in the past.
    Overdue,
    /// The next verification date falls within the look-ahead window
    /// (boundary inclusive).
    DueSoon,
    Current,
}

/// Add `interval_months` calendar months to `verification_date`.
///
/// Day-of-month overflow clamps to the last valid day of the resulting
/// month, so 2024-01-31 + 1 month is 2024-02-29 and 2023-01-31 + 1 month is
/// 2023-02-28. Returns `None` only when the result would overflow the date
/// range.
pub fn compute_next_verification(
    verification_date: NaiveDate,
    interval_months: u32,
) -> Option<NaiveDate> {
    verification_date.checked_add_months(Months::new(interval_months))
}

/// Classify verification timeliness with the default 30-day window.
pub fn derive_status(equipment: &Equipment, today: NaiveDate) -> VerificationStatus {
    derive_status_with_window(equipment, today, DEFAULT_DUE_SOON_WINDOW_DAYS)
}

/// Classify verification timeliness against `today`.
///
/// The server's `next_verification_date` is used when present; otherwise it
/// is recomputed from `verification_date` + `interval_months`. Without a
/// verification date, or when no next date is derivable, there is no
/// schedule to be due against.
pub fn derive_status_with_window(
    equipment: &Equipment,
    today: NaiveDate,
    window_days: i64,
) -> VerificationStatus {
    let Some(verification_date) = equipment.verification_date else {
        return VerificationStatus::NoSchedule;
    };
    let next = equipment.next_verification_date.or_else(|| {
        equipment
            .interval_months
            .and_then(|months| compute_next_verification(verification_date, months))
    });
    let Some(next) = next else {
        return VerificationStatus::NoSchedule;
    };

    if next < today {
        VerificationStatus::Overdue
    } else if (next - today).num_days() <= window_days {
        VerificationStatus::DueSoon
    } else {
        VerificationStatus::Current
    }
}
