pub const COUNTER_SELECTOR: &str = ".stat-number, .metric-value";
pub const COUNTER_THRESHOLD: f64 = 0.7;
pub const COUNTER_STEPS: u32 = 50;
pub const COUNTER_INTERVAL_MS: u32 = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct CounterSpec {
    source: String,
    target: f64,
    percentage: bool,
    plus: bool,
}

impl CounterSpec {
    /// Reads the design-time text of a stat. Returns `None` when it carries no
    /// digits, in which case the element is left alone.
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let base = digits.parse::<f64>().ok()?;

        let scale = if text.contains('M') {
            1_000_000.0
        } else if text.contains('K') {
            1_000.0
        } else {
            1.0
        };

        Some(Self {
            source: text.to_string(),
            target: base * scale,
            percentage: text.contains('%'),
            plus: text.contains('+'),
        })
    }

    #[cfg(test)]
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn animate(self, steps: u32) -> CounterAnimation {
        let increment = self.target / f64::from(steps.max(1));
        CounterAnimation {
            spec: self,
            current: 0.0,
            increment,
            finished: false,
        }
    }

    fn format_frame(&self, current: f64) -> String {
        let mut frame = if self.target >= 1_000.0 {
            format!("{}K", (current / 1_000.0).floor())
        } else {
            format!("{}", current.floor())
        };

        if self.plus {
            frame.push('+');
        }
        if self.percentage {
            frame.push('%');
        }
        frame
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CounterFrame {
    Running(String),
    Done(String),
}

impl CounterFrame {
    pub fn text(&self) -> &str {
        match self {
            Self::Running(text) | Self::Done(text) => text,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    spec: CounterSpec,
    current: f64,
    increment: f64,
    finished: bool,
}

impl CounterAnimation {
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one tick. The frame that reaches the target always shows the
    /// source text verbatim, whatever the interpolation rounded to.
    pub fn step(&mut self) -> CounterFrame {
        if !self.finished {
            self.current += self.increment;
            self.finished = self.current >= self.spec.target;
        }

        if self.finished {
            self.current = self.spec.target;
            return CounterFrame::Done(self.spec.source.clone());
        }

        CounterFrame::Running(self.spec.format_frame(self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(text: &str, steps: u32) -> (Vec<CounterFrame>, String) {
        let mut animation = CounterSpec::parse(text)
            .expect("text has digits")
            .animate(steps);
        let mut frames = Vec::new();

        for _ in 0..steps + 2 {
            let frame = animation.step();
            let done = matches!(frame, CounterFrame::Done(_));
            frames.push(frame);
            if done {
                break;
            }
        }

        let last = frames.last().expect("at least one frame").text().to_string();
        (frames, last)
    }

    #[test]
    fn parse_scales_suffixes() {
        assert_eq!(CounterSpec::parse("150+").map(|spec| spec.target()), Some(150.0));
        assert_eq!(CounterSpec::parse("10K+").map(|spec| spec.target()), Some(10_000.0));
        assert_eq!(CounterSpec::parse("2M").map(|spec| spec.target()), Some(2_000_000.0));
        assert_eq!(CounterSpec::parse("98%").map(|spec| spec.target()), Some(98.0));
    }

    #[test]
    fn parse_strips_every_non_digit() {
        assert_eq!(CounterSpec::parse("1.5K").map(|spec| spec.target()), Some(15_000.0));
        assert_eq!(CounterSpec::parse("1,200").map(|spec| spec.target()), Some(1_200.0));
    }

    #[test]
    fn digit_runs_wider_than_u64_still_animate() {
        let source = "123456789012345678901234+";
        let target = CounterSpec::parse(source).map(|spec| spec.target()).expect("digits parse");
        assert!(target > 1e23);

        let (frames, last) = run_to_end(source, COUNTER_STEPS);
        assert!(frames.len() > 1);
        assert_eq!(last, source);
    }

    #[test]
    fn text_without_digits_is_not_animated() {
        assert_eq!(CounterSpec::parse("many"), None);
        assert_eq!(CounterSpec::parse(""), None);
    }

    #[test]
    fn final_frame_restores_source_text() {
        for text in ["0", "7", "42", "99%", "150+", "2027", "10K", "25K+", "3M", "5M+", "100+%", "12K%"] {
            for steps in [1, 3, 7, COUNTER_STEPS, 97] {
                let (frames, last) = run_to_end(text, steps);
                assert_eq!(last, text, "steps={steps}");
                assert!(frames.len() <= steps as usize + 1, "{text} took {} frames", frames.len());
            }
        }
    }

    #[test]
    fn intermediate_frames_carry_suffixes() {
        let mut animation = CounterSpec::parse("150+")
            .expect("valid counter")
            .animate(COUNTER_STEPS);

        assert_eq!(animation.step(), CounterFrame::Running("3+".to_string()));
        assert_eq!(animation.step(), CounterFrame::Running("6+".to_string()));
    }

    #[test]
    fn large_targets_render_in_thousands() {
        let mut animation = CounterSpec::parse("2027")
            .expect("valid counter")
            .animate(2);

        assert_eq!(animation.step(), CounterFrame::Running("1K".to_string()));
        assert_eq!(animation.step(), CounterFrame::Done("2027".to_string()));
    }

    #[test]
    fn percentage_frames_end_with_percent() {
        let mut animation = CounterSpec::parse("98%")
            .expect("valid counter")
            .animate(COUNTER_STEPS);

        assert_eq!(animation.step(), CounterFrame::Running("1%".to_string()));
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        let mut animation = CounterSpec::parse("0+")
            .expect("valid counter")
            .animate(COUNTER_STEPS);

        assert_eq!(animation.step(), CounterFrame::Done("0+".to_string()));
        assert!(animation.is_finished());
    }

    #[test]
    fn steps_after_finish_stay_done() {
        let mut animation = CounterSpec::parse("5")
            .expect("valid counter")
            .animate(1);

        assert_eq!(animation.step(), CounterFrame::Done("5".to_string()));
        assert_eq!(animation.step(), CounterFrame::Done("5".to_string()));
    }
}
