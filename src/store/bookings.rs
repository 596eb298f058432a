use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::config::{STATS_DAYS_AHEAD, STATS_DAYS_BACK};
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, NewBooking};
use crate::services::notify;
use crate::store::{Storage, BOOKINGS_FILE};

pub const SLOT_TAKEN: &str = "This time slot is already booked. Please choose another time.";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn list_bookings(storage: &Storage) -> Result<Vec<Booking>, AppError> {
    storage.read_collection(BOOKINGS_FILE)
}

/// Validates the candidate, rejects it if the `(date, time)` slot is taken,
/// otherwise assigns an id, appends and persists. The conflict scan is a
/// linear pass over the full collection; the slot space per day is tiny.
pub fn create_booking(storage: &Storage, candidate: NewBooking) -> Result<Booking, AppError> {
    if candidate.name.trim().is_empty()
        || candidate.date.trim().is_empty()
        || candidate.time.trim().is_empty()
    {
        return Err(AppError::Validation("Missing booking details".to_string()));
    }

    let mut bookings = list_bookings(storage)?;

    let conflict = bookings
        .iter()
        .any(|b| b.date == candidate.date && b.time == candidate.time);
    if conflict {
        return Err(AppError::Conflict(SLOT_TAKEN.to_string()));
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        name: candidate.name,
        email: candidate.email,
        phone: candidate.phone,
        service: candidate.service,
        notes: candidate.notes,
        date: candidate.date,
        time: candidate.time,
        status: BookingStatus::Pending,
        created_at: Utc::now(),
    };
    bookings.push(booking.clone());
    storage.write_collection(BOOKINGS_FILE, &bookings)?;

    notify::append(
        storage,
        &format!(
            "New booking received from {} for {} on {} at {}",
            booking.name, booking.service, booking.date, booking.time
        ),
    );

    Ok(booking)
}

/// Removes the booking with the given id. Unknown ids are an idempotent
/// success; the return value says whether anything was removed.
pub fn delete_booking(storage: &Storage, id: &str) -> Result<bool, AppError> {
    let id = id.trim();
    let mut bookings = list_bookings(storage)?;
    let before = bookings.len();
    bookings.retain(|b| b.id != id);

    if bookings.len() == before {
        return Ok(false);
    }
    storage.write_collection(BOOKINGS_FILE, &bookings)?;
    Ok(true)
}

pub fn confirm_booking(storage: &Storage, id: &str) -> Result<Booking, AppError> {
    let id = id.trim();
    let mut bookings = list_bookings(storage)?;

    let booking = bookings
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    booking.status = BookingStatus::Confirmed;
    let confirmed = booking.clone();

    storage.write_collection(BOOKINGS_FILE, &bookings)?;
    Ok(confirmed)
}

/// Booking counts per date over the dashboard window, zero-filled so the
/// chart always has all 11 points.
pub fn booking_stats(storage: &Storage, today: NaiveDate) -> Result<BTreeMap<String, u32>, AppError> {
    let bookings = list_bookings(storage)?;

    let mut stats = BTreeMap::new();
    for offset in -STATS_DAYS_BACK..=STATS_DAYS_AHEAD {
        let day = today + Duration::days(offset);
        stats.insert(day.format(DATE_FORMAT).to_string(), 0u32);
    }
    for booking in &bookings {
        if let Some(count) = stats.get_mut(&booking.date) {
            *count += 1;
        }
    }

    Ok(stats)
}

/// Drops bookings whose date is strictly before the cutoff. The comparison
/// is on the date component only (midnight of the booking's date), so a
/// booking dated exactly at the cutoff stays. Dates that fail to parse are
/// kept; deleting records we cannot interpret would be data loss.
pub fn prune_expired(storage: &Storage, cutoff: NaiveDateTime) -> Result<usize, AppError> {
    let bookings = list_bookings(storage)?;
    let before = bookings.len();

    let kept: Vec<Booking> = bookings
        .into_iter()
        .filter(|b| match NaiveDate::parse_from_str(&b.date, DATE_FORMAT) {
            Ok(date) => date.and_time(NaiveTime::MIN) >= cutoff,
            Err(_) => true,
        })
        .collect();

    let removed = before - kept.len();
    if removed > 0 {
        storage.write_collection(BOOKINGS_FILE, &kept)?;
    }
    Ok(removed)
}
