mod format;
mod json;
mod table;

pub(crate) use json::{
    output_audits_json, output_progress_json, output_skills_json, output_summary_json,
    output_xp_json,
};
pub(crate) use table::{
    TableOptions, print_audits, print_progress, print_skills, print_summary, print_xp,
};
