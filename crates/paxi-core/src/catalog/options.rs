//! Option lists offered by the intake and onboarding questionnaires.

/// Problem categories an owner can tick on the intake form.
pub const PROBLEM_CATEGORIES: &[&str] = &[
    "Skin",
    "Digestive",
    "Respiratory",
    "Eyes",
    "Ears",
    "Dental",
    "Infection",
    "Injury",
    "Behavioral",
    "Mobility",
    "Urinary",
    "Other",
];

/// Observable signs an owner can tick on the intake form.
pub const KEY_SIGNS: &[&str] = &[
    "Itching",
    "Redness",
    "Swelling",
    "Oozing",
    "Hair Loss",
    "Vomiting",
    "Diarrhea",
    "Loss of Appetite",
    "Lethargy",
    "Limping",
    "Coughing",
    "Sneezing",
    "Eye Discharge",
    "Ear Discharge",
    "Bad Breath",
    "Excessive Thirst",
    "Frequent Urination",
    "Weight Loss",
    "Weight Gain",
    "Behavioral Change",
];

/// How the problem has developed since onset.
pub const PROGRESSION_OPTIONS: &[&str] = &["Improving", "Stable", "Worsening", "Fluctuating"];

/// General status values (appetite, water intake, mobility).
pub const STATUS_OPTIONS: &[&str] = &["Normal", "Reduced", "Increased", "Absent"];

/// Find the canonical spelling of `value` in `options`, ignoring case.
pub fn canonical_option(options: &[&'static str], value: &str) -> Option<&'static str> {
    let value = value.trim();
    options
        .iter()
        .copied()
        .find(|opt| opt.eq_ignore_ascii_case(value))
}
