//! Campaign send schedule

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use outreach_common::types::{AccountId, ReplyHandling};
use outreach_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sending rules configured on the review page and stored on the
/// campaign record at launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSchedule {
    /// First send date; `None` means send as soon as launched.
    pub start_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    /// IANA timezone name the window times are interpreted in.
    pub timezone: String,

    pub send_days: Vec<Weekday>,
    pub send_time_start: NaiveTime,
    pub send_time_end: NaiveTime,

    pub max_emails_per_day: u32,
    /// Minutes between consecutive sends.
    pub pause_between_emails: u32,
    /// Days between sequence steps when a step has no explicit delay.
    pub follow_up_delay: u32,

    pub enable_smart_timing: bool,
    pub respect_recipient_timezone: bool,
    pub pause_on_weekends: bool,
    pub tracking_enabled: bool,
    pub unsubscribe_link: bool,

    #[serde(default)]
    pub reply_handling: ReplyHandling,

    /// Account the campaign sends from. Required before launch.
    pub sender_account_id: Option<AccountId>,
}

impl Default for CampaignSchedule {
    fn default() -> Self {
        Self {
            start_date: None,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            timezone: "UTC".to_string(),
            send_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            send_time_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            send_time_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            max_emails_per_day: 100,
            pause_between_emails: 5,
            follow_up_delay: 3,
            enable_smart_timing: false,
            respect_recipient_timezone: false,
            pause_on_weekends: true,
            tracking_enabled: true,
            unsubscribe_link: true,
            reply_handling: ReplyHandling::default(),
            sender_account_id: None,
        }
    }
}

impl CampaignSchedule {
    /// Check the schedule is launchable.
    pub fn validate(&self) -> Result<()> {
        if self.sender_account_id.is_none() {
            return Err(Error::Validation(
                "A sender account must be selected before launch".to_string(),
            ));
        }
        if self.send_days.is_empty() {
            return Err(Error::Validation(
                "At least one send day must be selected".to_string(),
            ));
        }
        if self.send_time_start >= self.send_time_end {
            return Err(Error::Validation(
                "Send window start must be before its end".to_string(),
            ));
        }
        if self.max_emails_per_day == 0 {
            return Err(Error::Validation(
                "Daily email limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The moment the campaign becomes eligible to send, or `None`
    /// for launch-immediately schedules.
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|date| date.and_time(self.start_time).and_utc())
    }

    /// Whether the window allows sending on the given weekday.
    pub fn sends_on(&self, day: Weekday) -> bool {
        if self.pause_on_weekends && matches!(day, Weekday::Sat | Weekday::Sun) {
            return false;
        }
        self.send_days.contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_review_page() {
        let schedule = CampaignSchedule::default();
        assert_eq!(schedule.send_days.len(), 5);
        assert!(!schedule.send_days.contains(&Weekday::Sat));
        assert_eq!(schedule.send_time_start.to_string(), "09:00:00");
        assert_eq!(schedule.send_time_end.to_string(), "17:00:00");
        assert_eq!(schedule.max_emails_per_day, 100);
        assert_eq!(schedule.pause_between_emails, 5);
        assert_eq!(schedule.follow_up_delay, 3);
        assert_eq!(schedule.reply_handling, ReplyHandling::AutoRespond);
    }

    #[test]
    fn test_validate_requires_sender() {
        let schedule = CampaignSchedule::default();
        let err = schedule.validate().unwrap_err();
        assert!(err.to_string().contains("sender account"));

        let schedule = CampaignSchedule {
            sender_account_id: Some(uuid::Uuid::new_v4()),
            ..Default::default()
        };
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let schedule = CampaignSchedule {
            sender_account_id: Some(uuid::Uuid::new_v4()),
            send_time_start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            send_time_end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            ..Default::default()
        };
        let err = schedule.validate().unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_validate_rejects_empty_send_days() {
        let schedule = CampaignSchedule {
            sender_account_id: Some(uuid::Uuid::new_v4()),
            send_days: Vec::new(),
            ..Default::default()
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_scheduled_at_combines_date_and_time() {
        let schedule = CampaignSchedule {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2),
            start_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            ..Default::default()
        };
        let at = schedule.scheduled_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2026-03-02T10:30:00+00:00");

        assert_eq!(CampaignSchedule::default().scheduled_at(), None);
    }

    #[test]
    fn test_weekend_pause_overrides_send_days() {
        let schedule = CampaignSchedule {
            send_days: vec![Weekday::Mon, Weekday::Sat],
            ..Default::default()
        };
        assert!(schedule.sends_on(Weekday::Mon));
        assert!(!schedule.sends_on(Weekday::Sat));

        let schedule = CampaignSchedule {
            pause_on_weekends: false,
            send_days: vec![Weekday::Sat],
            ..Default::default()
        };
        assert!(schedule.sends_on(Weekday::Sat));
    }
}
