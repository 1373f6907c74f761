/// A built-in example text the user can load into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub label: &'static str,
    pub text: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        label: "Political",
        text: "The radical leftist mob attacked our traditional values while corrupt elites looked away.",
    },
    Sample {
        label: "Gender",
        text: "Women are naturally too emotional for leadership, so the chairman should be a strong man.",
    },
    Sample {
        label: "Age",
        text: "Lazy millennials are entitled, and the old guard is just a bunch of out of touch dinosaurs.",
    },
    Sample {
        label: "Neutral",
        text: "The committee met on Tuesday to review the quarterly budget and approved two proposals.",
    },
];

/// Looks up a sample by its 1-based position, as shown to the user.
pub fn by_number(number: usize) -> Option<&'static Sample> {
    number.checked_sub(1).and_then(|index| SAMPLES.get(index))
}
