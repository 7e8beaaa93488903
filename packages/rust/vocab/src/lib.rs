//! Closed vocabularies and whitelist filtering.
//!
//! Every classification field in the output is clamped to one of these
//! fixed sets. The lists are process-wide, immutable, and safe for
//! unsynchronized concurrent reads. Values outside a set are not errors —
//! they are silently dropped (filtering is routine, expected behavior).
//!
//! The entries are kept verbatim as published by the job board, including
//! a few idiosyncratic spellings and trailing spaces — exact-match
//! validation means we must carry them as-is.

/// Job categories — the output keeps at most one of these.
pub const JOB_CATEGORIES: &[&str] = &[
    "Admin & Operations",
    "Customer Support",
    "Data",
    "Design",
    "Engineering",
    "Finance",
    "Human Resources",
    "IT",
    "Legal",
    "Marketing",
    "Product",
    "Sales",
    "All Others",
];

/// Employment types; "high salary" is also appended here by the salary rule.
pub const JOB_TYPES: &[&str] = &[
    "full-time",
    "Part Time",
    "Internship",
    "Freelance",
    "Temporary",
    "4 day week",
    "AI",
    "German",
    "Multilingual",
    "Bilingual",
    "jobs in crypto",
    "web3",
    "high salary",
];

/// Skill/topic tags, including the experience-range markers.
pub const JOB_TAGS: &[&str] = &[
    ".NET",
    "1-3 years",
    "3-5 years",
    "5+ years",
    "agile",
    "AI",
    "Android",
    "Angular",
    "ASP.NET",
    "Bash",
    "BigQuery",
    "Bilingual",
    "Blockchain",
    "C#",
    "DevOps",
    "SecOps",
    "Django",
    "docker",
    "Drupal",
    "Elixir",
    "Entry Level",
    "Flask",
    "Flutter",
    "Git",
    "Go",
    "Golang",
    "GraphQL",
    "High-Salary",
    "iOS",
    "Java",
    "Javascript",
    "jobs in crypto",
    "jQuery",
    "Machine Learning",
    "MongoDB",
    "MySQL",
    "Next.js",
    "Node",
    "node.js",
    "noSQL",
    "PHP",
    "PostgreSQL",
    "Python",
    "R",
    "Rails",
    "React",
    "react native",
    "Reactjs",
    "Redux",
    "Rust",
    "Scala",
    "Snowflake",
    "Solidity",
    "Spark",
    "SQL",
    "Swift",
    "Tableau",
    "Tailwind",
    "Terraform",
    "Typescript",
    "Ubutu",
    "vue",
    "vue.js",
    "web3",
    "WordPress",
    "work from anywhere ",
    "Visa support",
    "Relocation support",
    "company off-sites",
    "home-office budget",
    "Fertility benefits",
    "coworking budget",
    "wellbeing allowance",
    "professional development budget",
    "mental health support",
    "parental leave",
    "Health insurance",
    "Unlimited Time Off",
    "Childcare support",
    "Flexible Schedule",
    "Equity",
    "Kubernetes",
    "Linux",
    "Ruby",
    "Ruby on Rails",
    "high-salary",
];

/// Benefit phrases.
pub const BENEFITS: &[&str] = &[
    "home-office budget",
    "Fertility benefits",
    "company retreats",
    "4 day work week ",
    "coworking budget",
    "wellbeing allowance",
    "professional development allowance",
    "mental health support",
    "parental leave",
    "Health insurance",
    "Unlimited Time Off",
    "Childcare support",
    "Flexible Schedule",
    "Equity / Stocks",
    "work from anywhere policy",
];

/// Regions and countries.
pub const JOB_REGIONS: &[&str] = &[
    "Worldwide",
    "EMEA",
    "Africa",
    "Ghana",
    "Kenya",
    "Egypt",
    "South Africa",
    "Europe",
    "Armenia",
    "Austria",
    "Belgium",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czechia",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Macedonia",
    "Malta",
    "Netherlands",
    "Norway",
    "Portugal",
    "Poland",
    "Romania",
    "Serbia",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Switzerland",
    "Sweden",
    "Turkey",
    "Ukraine",
    "UK",
    "Georgia",
    "UAE",
    "India",
    "LATAM",
    "Argentina",
    "Brazil",
    "Colombia",
    "AMER",
    "Canada",
    "US",
    "Mexico",
    "APAC",
    "Singapore",
    "Australia",
    "Asia",
];

// ---------------------------------------------------------------------------
// Whitelist filtering
// ---------------------------------------------------------------------------

/// Deduplicate while preserving first-seen order.
pub fn unique_keep_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

/// Keep `value` only if it is an exact (case-sensitive) member of `allowed`.
pub fn validate_one(value: &str, allowed: &[&str]) -> String {
    if allowed.contains(&value) {
        value.to_string()
    } else {
        String::new()
    }
}

/// Deduplicate preserving order, then filter to exact whitelist membership.
pub fn validate_many<I, S>(values: I, allowed: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    unique_keep_order(values)
        .into_iter()
        .filter(|v| allowed.contains(&v.as_str()))
        .collect()
}
