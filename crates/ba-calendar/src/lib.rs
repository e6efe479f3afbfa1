//! # ba-calendar
//!
//! Business-calendar and delivery-planning computation for analysts and the
//! agents working alongside them.
//!
//! Working days respect weekends and a swappable bank-holiday table. Sprint
//! schedules, release projections, fiscal periods, timezone conversion and
//! meeting-slot search are all built on that calendar. The same operations
//! are exposed by name through [`Toolkit`] for JSON-driven callers.
//!
//! ## Modules
//!
//! - [`calendar`]: holiday tables and the weekend/holiday working-day predicate
//! - [`working_days`]: counting, adding and subtracting working days
//! - [`sprint`]: contiguous fixed-length sprint schedules
//! - [`release`]: velocity-based release date projection
//! - [`fiscal`]: fiscal year and quarter resolution
//! - [`timezone`]: fixed-offset wall-clock conversion
//! - [`meeting`]: cross-timezone meeting slot search
//! - [`agile`]: velocity, point/hour conversion, estimation scales, requirement IDs
//! - [`moscow`]: MoSCoW breakdown, capacity planning, dependency checks
//! - [`text`]: line-oriented text transforms and the user-story template
//! - [`config`]: TOML configuration with environment overrides
//! - [`tools`]: named-tool dispatch over JSON arguments
//! - [`error`]: error types

pub mod agile;
pub mod calendar;
pub mod config;
pub mod error;
pub mod fiscal;
pub mod meeting;
pub mod moscow;
pub mod release;
pub mod sprint;
pub mod text;
pub mod timezone;
pub mod tools;
pub mod working_days;

pub use agile::{
    convert_estimation, points_to_hours, requirement_ids, velocity_report, CapacityAdjustments,
    EstimateValue, EstimationConversion, EstimationSystem, HoursEstimate, VelocityReport,
};
pub use calendar::{is_weekend, parse_date, BusinessCalendar, HolidaySet};
pub use config::EngineConfig;
pub use error::CalendarError;
pub use fiscal::{resolve_fiscal_period, FiscalPeriod};
pub use meeting::{find_meeting_time, MeetingSearch, MeetingSuggestion, Participant};
pub use moscow::{
    check_points, plan_capacity, summarize_priorities, validate_dependencies, CapacityPlan,
    DependencyReport, Priority, PrioritySummary, Requirement,
};
pub use release::{project_release, ReleaseProjection};
pub use sprint::{schedule_sprints, Sprint};
pub use text::{format_user_story, TextOperation, TextOutput, UserStory};
pub use timezone::{convert_timezone, ConvertedTime, TimezoneTable, WallClock};
pub use tools::{Defaults, ToolDescriptor, Toolkit};
