mod common;

mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use porch_lights::color::{BLACK, WARM_WHITE};
    use porch_lights::scheduler::TickOutcome;
    use porch_lights::{
        Channel, ChannelConfig, DailyWindow, DisplayMode, Override, ScheduleConfig, Scheduler,
        SeasonalWindow,
    };

    use crate::common::{FAST, RecordingDriver, Recorder, uniform};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    /// Small plain channel, small seasonal channel, large seasonal channel
    fn porch() -> (Vec<Channel<RecordingDriver>>, Vec<Recorder>) {
        [
            (5, ChannelConfig::DEFAULT),
            (20, ChannelConfig::seasonal()),
            (150, ChannelConfig::seasonal()),
        ]
        .into_iter()
        .enumerate()
        .map(|(id, (len, config))| {
            let driver = RecordingDriver::new(len);
            let recorder = driver.recorder();
            (Channel::new(id, driver, config, FAST), recorder)
        })
        .unzip()
    }

    #[test]
    fn test_daily_window_wraps_past_midnight() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        assert!(!scheduler.compute_should_be_on(&at(2024, 6, 1, 15, 59)));
        assert!(scheduler.compute_should_be_on(&at(2024, 6, 1, 16, 0)));
        assert!(scheduler.compute_should_be_on(&at(2024, 6, 1, 23, 59)));
        assert!(!scheduler.compute_should_be_on(&at(2024, 6, 2, 0, 0)));
        assert!(!scheduler.compute_should_be_on(&at(2024, 6, 2, 9, 30)));
    }

    #[test]
    fn test_daily_window_variants() {
        let plain = DailyWindow::from_hours_minutes(8, 0, 17, 30);
        assert!(plain.contains(8 * 60));
        assert!(plain.contains(17 * 60 + 29));
        assert!(!plain.contains(17 * 60 + 30));
        assert!(!plain.contains(7 * 60 + 59));

        let empty = DailyWindow::new(600, 600);
        assert!((0..1440).all(|minute| !empty.contains(minute)));
    }

    #[test]
    fn test_override_preempts_window() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        let noon = at(2024, 6, 1, 12, 0);
        let evening = at(2024, 6, 1, 20, 0);

        scheduler.set_override(Override::ForceOn);
        assert!(scheduler.compute_should_be_on(&noon));

        scheduler.set_override(Override::ForceOff);
        assert!(!scheduler.compute_should_be_on(&evening));

        scheduler.set_override(Override::Auto);
        assert_eq!(scheduler.override_state(), Override::Auto);
        assert!(!scheduler.compute_should_be_on(&noon));
        assert!(scheduler.compute_should_be_on(&evening));
    }

    #[test]
    fn test_seasonal_window_straddles_new_year() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        assert!(scheduler.is_in_seasonal_window(&date(12, 25)));
        assert!(scheduler.is_in_seasonal_window(&date(12, 18)));
        assert!(scheduler.is_in_seasonal_window(&date(1, 1)));
        assert!(scheduler.is_in_seasonal_window(&date(1, 5)));
        assert!(!scheduler.is_in_seasonal_window(&date(1, 6)));
        assert!(!scheduler.is_in_seasonal_window(&date(12, 10)));
        assert!(!scheduler.is_in_seasonal_window(&date(6, 1)));
    }

    #[test]
    fn test_daily_window_moved_at_runtime() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        let (channels, recorders) = porch();
        let morning = at(2024, 6, 1, 7, 0);

        let outcome = scheduler.tick(&morning, &channels).unwrap();
        assert!(!outcome.should_be_on);

        let early = DailyWindow::from_hours_minutes(6, 30, 8, 0);
        scheduler.set_daily_window(early);
        assert_eq!(scheduler.daily_window(), early);

        let outcome = scheduler.tick(&morning, &channels).unwrap();
        assert!(outcome.should_be_on && outcome.transition);
        assert!(channels.iter().all(Channel::is_on));
        assert!(uniform(&recorders[0].last().unwrap(), WARM_WHITE));

        let outcome = scheduler.tick(&at(2024, 6, 1, 8, 0), &channels).unwrap();
        assert!(!outcome.should_be_on && outcome.transition);
        assert!(channels.iter().all(|c| !c.is_on()));
    }

    #[test]
    fn test_seasonal_window_within_one_month() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        let march = SeasonalWindow::new(3, 1, 3, 10);
        scheduler.set_seasonal_window(march);
        assert_eq!(scheduler.seasonal_window(), march);
        assert!(scheduler.is_in_seasonal_window(&date(3, 5)));
        assert!(scheduler.is_in_seasonal_window(&date(3, 10)));
        assert!(!scheduler.is_in_seasonal_window(&date(3, 15)));
        assert!(!scheduler.is_in_seasonal_window(&date(2, 20)));
    }

    #[test]
    fn test_choose_mode_uses_size_threshold() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        assert_eq!(scheduler.choose_mode(true, 5), DisplayMode::SeasonalCycle);
        assert_eq!(scheduler.choose_mode(false, 49), DisplayMode::Standard);
        assert_eq!(scheduler.choose_mode(false, 50), DisplayMode::SpacedPattern);
        assert_eq!(scheduler.choose_mode(false, 150), DisplayMode::SpacedPattern);
    }

    #[test]
    fn test_tick_out_of_season() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        let (channels, recorders) = porch();

        let outcome = scheduler.tick(&at(2024, 6, 1, 12, 0), &channels).unwrap();
        assert_eq!(
            outcome,
            TickOutcome {
                should_be_on: false,
                transition: false,
                seasonal: false
            }
        );
        assert!(recorders.iter().all(|r| r.count() == 0));

        let outcome = scheduler.tick(&at(2024, 6, 1, 16, 0), &channels).unwrap();
        assert!(outcome.should_be_on && outcome.transition && !outcome.seasonal);
        assert!(scheduler.previous_should_be_on());
        assert_eq!(channels[0].mode(), DisplayMode::Standard);
        assert_eq!(channels[1].mode(), DisplayMode::Standard);
        assert_eq!(channels[2].mode(), DisplayMode::SpacedPattern);
        assert!(channels.iter().all(Channel::is_on));
        assert!(uniform(&recorders[1].last().unwrap(), WARM_WHITE));
        let large = recorders[2].last().unwrap();
        assert_eq!(large[0], WARM_WHITE);
        assert_eq!(large[1], BLACK);

        // no transition, so a manual mode change survives
        channels[2].set_mode(DisplayMode::ThreeSpots).unwrap();
        let outcome = scheduler.tick(&at(2024, 6, 1, 16, 1), &channels).unwrap();
        assert!(!outcome.transition);
        assert_eq!(channels[2].mode(), DisplayMode::ThreeSpots);

        let outcome = scheduler.tick(&at(2024, 6, 2, 0, 0), &channels).unwrap();
        assert!(!outcome.should_be_on && outcome.transition);
        assert!(channels.iter().all(|c| !c.is_on()));
        assert!(recorders.iter().all(|r| uniform(&r.last().unwrap(), BLACK)));
    }

    #[test]
    fn test_tick_in_season_starts_animations() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        let (channels, recorders) = porch();

        let outcome = scheduler.tick(&at(2024, 12, 25, 16, 0), &channels).unwrap();
        assert!(outcome.should_be_on && outcome.transition && outcome.seasonal);
        assert_eq!(channels[0].mode(), DisplayMode::Standard);
        assert!(!channels[0].is_animating());
        assert!(channels[1].is_animating());
        assert!(channels[2].is_animating());
        assert_eq!(channels[2].mode(), DisplayMode::SeasonalCycle);

        scheduler.set_override(Override::ForceOff);
        let outcome = scheduler.tick(&at(2024, 12, 25, 16, 1), &channels).unwrap();
        assert!(!outcome.should_be_on && outcome.transition);
        assert!(channels.iter().all(|c| !c.is_animating() && !c.is_on()));
        assert!(recorders.iter().all(|r| uniform(&r.last().unwrap(), BLACK)));
    }

    #[test]
    fn test_mode_only_changes_at_transitions() {
        let scheduler = Scheduler::new(&ScheduleConfig::DEFAULT);
        let (channels, _) = porch();

        scheduler.tick(&at(2024, 12, 25, 23, 58), &channels).unwrap();
        assert!(channels[1].is_animating());

        // the date leaves the window while the lights stay on
        scheduler.set_override(Override::ForceOn);
        scheduler.tick(&at(2025, 1, 6, 12, 0), &channels).unwrap();
        assert_eq!(channels[1].mode(), DisplayMode::SeasonalCycle);
        assert!(channels[1].is_animating());

        scheduler.set_override(Override::ForceOff);
        scheduler.tick(&at(2025, 1, 6, 12, 1), &channels).unwrap();
        assert_eq!(channels[1].mode(), DisplayMode::Standard);
        assert!(!channels[1].is_animating());
    }
}
