//! Attach explanation text to metric results.

use fairness_catalog::MetricSpec;
use fairness_model::{Assessment, Explanation};

/// Static catalog text, plus the dynamic template for Warning and Violation.
pub fn explain(spec: &MetricSpec, assessment: Assessment) -> Explanation {
    let mut explanation = Explanation {
        display_name: spec.display_name.to_string(),
        definition: spec.definition.to_string(),
        interpretation: spec.interpretation.to_string(),
        context: spec.context.to_string(),
        current_segment: spec.segments.label(assessment).map(str::to_string),
        ..Explanation::default()
    };

    if let Some(template) = spec.template(assessment) {
        explanation.what_this_means = Some(template.what_this_means.to_string());
        explanation.what_is_wrong = Some(template.what_is_wrong.to_string());
        explanation.root_causes = template
            .root_causes
            .iter()
            .copied()
            .map(str::to_string)
            .collect();
        explanation.recruiter_actions = template
            .recruiter_actions
            .iter()
            .copied()
            .map(str::to_string)
            .collect();
        explanation.dashboard_recommendation = Some(template.dashboard_recommendation.to_string());
    }
    explanation
}
