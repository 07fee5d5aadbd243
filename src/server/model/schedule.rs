use chrono::{DateTime, Duration, Utc};
use std::{fmt, str::FromStr};

use crate::server::{
    error::{internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

/// Slack subtracted from a schedule's interval when checking whether it is due.
///
/// Must stay below the scheduler's hourly tick so a run recorded a little late on one
/// tick is still due on the matching tick one interval later.
pub const DUE_TOLERANCE_MINUTES: i64 = 30;

/// How often a scheduled backup runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::days(7),
            Self::Monthly => Duration::days(30),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == value)
            .ok_or_else(|| InternalError::UnknownColumnValue {
                column: "frequency",
                value: value.to_string(),
            })
    }
}

/// Recurring backup intent for a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupSchedule {
    pub id: i32,
    pub guild_id: u64,
    pub owner_user_id: u64,
    pub frequency: Frequency,
    pub last_run_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl BackupSchedule {
    pub fn from_entity(entity: entity::backup_schedule::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            owner_user_id: parse_u64_from_string(entity.owner_user_id)?,
            frequency: entity.frequency.parse()?,
            last_run_at: entity.last_run_at,
            created_at: entity.created_at,
        })
    }

    /// A schedule is due when it never ran or its interval, less
    /// `DUE_TOLERANCE_MINUTES`, has elapsed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_run_at {
            None => true,
            Some(last_run_at) => {
                now - last_run_at
                    >= self.frequency.interval() - Duration::minutes(DUE_TOLERANCE_MINUTES)
            }
        }
    }

    /// Description stored on snapshots created by this schedule.
    pub fn snapshot_description(&self) -> String {
        format!("Scheduled {} backup", self.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(frequency: Frequency, last_run_at: Option<DateTime<Utc>>) -> BackupSchedule {
        BackupSchedule {
            id: 1,
            guild_id: 1,
            owner_user_id: 2,
            frequency,
            last_run_at,
            created_at: Utc::now(),
        }
    }

    /// Tests that a schedule that never ran is due.
    ///
    /// Expected: true
    #[test]
    fn never_run_is_due() {
        assert!(schedule(Frequency::Monthly, None).is_due(Utc::now()));
    }

    /// Tests interval boundaries for weekly schedules.
    ///
    /// Expected: not due after 6 days, due after 7
    #[test]
    fn weekly_interval() {
        let now = Utc::now();

        assert!(!schedule(Frequency::Weekly, Some(now - Duration::days(6))).is_due(now));
        assert!(schedule(Frequency::Weekly, Some(now - Duration::days(7))).is_due(now));
    }

    /// Tests that jitter between hourly ticks doesn't push a run back an hour.
    ///
    /// The last run was recorded 150ms after a tick and the next daily tick fires
    /// only 100ms after its scheduled time.
    ///
    /// Expected: due on the next daily tick, not due an hour earlier
    #[test]
    fn due_on_matching_tick_despite_latency() {
        let tick = Utc::now();
        let daily = schedule(
            Frequency::Daily,
            Some(tick + Duration::milliseconds(150)),
        );

        assert!(daily.is_due(tick + Duration::days(1) + Duration::milliseconds(100)));
        assert!(!daily.is_due(tick + Duration::hours(23) + Duration::milliseconds(100)));
    }

    /// Tests the description attached to scheduled snapshots.
    ///
    /// Expected: "Scheduled daily backup"
    #[test]
    fn describes_scheduled_snapshot() {
        assert_eq!(
            schedule(Frequency::Daily, None).snapshot_description(),
            "Scheduled daily backup"
        );
    }
}
