/*
 *  providers/season.rs
 *
 *  nature-oracle - slides for a small screen
 *  (c) 2025 nature-oracle contributors
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use chrono::{Datelike, Local, NaiveDate};

use super::{ContentProvider, Panel, ProviderError};
use crate::slide::Slide;

/// Where today falls within the astronomical seasons
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonInfo {
    pub season: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub next_event: &'static str,
}

impl SeasonInfo {
    /// Northern-hemisphere boundaries fixed at 20 Mar, 21 Jun, 22 Sep, 21 Dec.
    pub fn for_date(today: NaiveDate) -> Option<Self> {
        let year = today.year();
        let spring = NaiveDate::from_ymd_opt(year, 3, 20)?;
        let summer = NaiveDate::from_ymd_opt(year, 6, 21)?;
        let fall = NaiveDate::from_ymd_opt(year, 9, 22)?;
        let winter = NaiveDate::from_ymd_opt(year, 12, 21)?;

        let info = if today < spring {
            let start = NaiveDate::from_ymd_opt(year - 1, 12, 21)?;
            Self { season: "Winter", start, end: spring, next_event: "Spring Equinox" }
        } else if today < summer {
            Self { season: "Spring", start: spring, end: summer, next_event: "Summer Solstice" }
        } else if today < fall {
            Self { season: "Summer", start: summer, end: fall, next_event: "Fall Equinox" }
        } else if today < winter {
            Self { season: "Fall", start: fall, end: winter, next_event: "Winter Solstice" }
        } else {
            let end = NaiveDate::from_ymd_opt(year + 1, 3, 20)?;
            Self { season: "Winter", start: winter, end, next_event: "Spring Equinox" }
        };
        Some(info)
    }

    pub fn progress(&self, today: NaiveDate) -> f64 {
        let total = (self.end - self.start).num_days();
        if total <= 0 {
            return 0.0;
        }
        (today - self.start).num_days() as f64 / total as f64 * 100.0
    }

    pub fn days_until_end(&self, today: NaiveDate) -> i64 {
        (self.end - today).num_days()
    }
}

/// Current season with a progress bar and the next solstice or equinox.
pub struct SeasonProvider {
    panel: Panel,
}

impl SeasonProvider {
    pub fn new(panel: Panel) -> Self {
        Self { panel }
    }

    pub fn slide_for(&self, today: NaiveDate) -> Option<Slide> {
        let info = SeasonInfo::for_date(today)?;
        let label = format!(
            "{}\nNext astronomical event: {} in {} days",
            info.season,
            info.next_event,
            info.days_until_end(today)
        );
        Some(self.panel.progress_slide("SEASON & EVENT", &label, info.progress(today)))
    }
}

impl ContentProvider for SeasonProvider {
    fn name(&self) -> &str {
        "season"
    }

    fn slides(&self) -> Result<Vec<Slide>, ProviderError> {
        let today = Local::now().date_naive();
        self.slide_for(today).map(|s| vec![s]).ok_or(ProviderError::Empty)
    }
}
