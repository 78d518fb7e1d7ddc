//! The registered fairness metrics.

use fairness_model::{InputColumn, VisualizationType};

use crate::metric::{AssessmentPolicy, Guidance, MetricId, MetricSpec, SegmentLabels};

const SELECTION: &[InputColumn] = &[InputColumn::Shortlisted];
const OUTCOMES: &[InputColumn] = &[InputColumn::Actual, InputColumn::Predicted];
const SCORES: &[InputColumn] = &[InputColumn::Score];

static METRIC_SPECS: [MetricSpec; 13] = [
    MetricSpec {
        id: MetricId::DemographicParity,
        display_name: "Demographic Parity",
        definition: "Ensures that the proportion of individuals receiving a positive outcome (e.g., being shortlisted) is equal across all groups defined by protected attributes.",
        interpretation: "The shortlisting rates should be similar across all groups. Differences less than 10% are generally considered fair.",
        context: "Use this metric when you want to ensure equal representation in positive outcomes regardless of group membership. Most appropriate for screening decisions.",
        required_columns: SELECTION,
        visualization_type: VisualizationType::Bar,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Practically equal selection",
            warning: "Noticeable imbalance",
            violation: "Strong imbalance",
        },
        guidance: Guidance {
            what_this_means: "One group is being shortlisted more often regardless of qualification.",
            what_is_wrong: "The screening system is over-selecting one group. Hiring is outcome-biased, not merit-based.",
            watch_what_is_wrong: "Selection rates are starting to favor one group. Outcomes are drifting away from merit.",
            root_causes: &[
                "Use of biased historical data",
                "Proxy features (education, experience) correlated with gender/age",
                "Single hard threshold applied uniformly",
            ],
            recruiter_actions: &[
                "Review screening score distribution by group",
                "Introduce group-aware threshold audits",
                "Remove or re-weight proxy features",
                "Add post-screening fairness checks",
            ],
            dashboard_recommendation: "Selection rates differ significantly across groups. Review screening thresholds and feature weights to ensure equal access to shortlisting.",
            watch_recommendation: "Selection rates are drifting apart across groups. Monitor screening thresholds before the gap widens.",
        },
    },
    MetricSpec {
        id: MetricId::DisparateImpact,
        display_name: "Disparate Impact (80% Rule)",
        definition: "Measures the ratio of selection rates between groups. The 80% rule (also called four-fifths rule) is a legal standard in employment.",
        interpretation: "The ratio should be at least 0.8 (80%). Values below 0.8 may indicate adverse impact.",
        context: "This is a legal standard used by EEOC and courts to detect discrimination. Particularly important for hiring and promotion decisions.",
        required_columns: SELECTION,
        visualization_type: VisualizationType::Metric,
        policy: AssessmentPolicy::Ratio,
        segments: SegmentLabels {
            fair: "Passes 80% rule",
            warning: "Potential adverse impact",
            violation: "Strong adverse impact",
        },
        guidance: Guidance {
            what_this_means: "A protected group receives less than 80% of the opportunities compared to the reference group.",
            what_is_wrong: "The system violates regulatory fairness standards. Potential legal and compliance risk.",
            watch_what_is_wrong: "The selection ratio is under the 80% rule. Adverse impact is possible.",
            root_causes: &[
                "Screening score penalizes certain demographics",
                "Hard filters disproportionately remove one group",
            ],
            recruiter_actions: &[
                "Immediately audit AI screening rules",
                "Run counterfactual tests (same candidate, different group)",
                "Adjust thresholds or scoring weights",
                "Introduce fairness-aware post-processing",
            ],
            dashboard_recommendation: "Fails the 80% rule. This indicates adverse impact and potential regulatory risk. Immediate model and threshold review required.",
            watch_recommendation: "Below the 80% rule. Potential adverse impact; review thresholds and scoring weights.",
        },
    },
    MetricSpec {
        id: MetricId::EqualOpportunity,
        display_name: "Equal Opportunity (TPR Equality)",
        definition: "Ensures that the True Positive Rate (correctly identifying qualified candidates) is equal across groups.",
        interpretation: "All qualified candidates should have an equal chance of being identified as qualified, regardless of group. Values should be similar across groups.",
        context: "Use when the cost of false negatives (missing qualified candidates) is high and should be distributed fairly.",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Bar,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Qualified treated equally",
            warning: "Unequal access",
            violation: "Qualified candidates missed",
        },
        guidance: Guidance {
            what_this_means: "Qualified candidates from one group are being missed.",
            what_is_wrong: "Merit is not rewarded equally. High-quality candidates are lost unfairly.",
            watch_what_is_wrong: "Qualified candidates are recognized slightly less often in one group.",
            root_causes: &[
                "Screening score underestimates capability of one group",
                "Resume features are unevenly interpreted",
            ],
            recruiter_actions: &[
                "Re-evaluate what 'qualified' means",
                "Improve feature engineering (skills over proxies)",
                "Introduce manual review for borderline cases",
            ],
            dashboard_recommendation: "Qualified candidates from one group are less likely to be shortlisted. Review feature relevance and qualification definitions.",
            watch_recommendation: "Qualified candidates are identified unevenly across groups. Review borderline rejections.",
        },
    },
    MetricSpec {
        id: MetricId::PredictiveEquality,
        display_name: "Predictive Equality (FPR Equality)",
        definition: "Ensures that the False Positive Rate (incorrectly identifying unqualified candidates) is equal across groups.",
        interpretation: "Unqualified candidates from all groups should have an equal chance of being incorrectly selected. Rates should be similar.",
        context: "Use when the cost of false positives (selecting unqualified candidates) should be distributed fairly across groups.",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Bar,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Balanced errors",
            warning: "Inconsistent leniency",
            violation: "One group favored",
        },
        guidance: Guidance {
            what_this_means: "One group is being shortlisted incorrectly more often.",
            what_is_wrong: "Hiring quality is inconsistent. One group benefits from leniency.",
            watch_what_is_wrong: "One group is shortlisted with slightly more leniency than others.",
            root_causes: &[
                "Threshold too low for certain groups",
                "Noise or bias in score calibration",
            ],
            recruiter_actions: &[
                "Tighten screening thresholds",
                "Improve validation of shortlisting decisions",
                "Apply consistent evaluation criteria",
            ],
            dashboard_recommendation: "False positive rates differ across groups, indicating inconsistent shortlisting quality.",
            watch_recommendation: "False positive rates are starting to diverge across groups. Check shortlisting consistency.",
        },
    },
    MetricSpec {
        id: MetricId::CalibrationByGroup,
        display_name: "Calibration by Group",
        definition: "Ensures that predicted probabilities or scores reflect actual outcomes equally well across groups.",
        interpretation: "For each score range, the actual success rate should be similar across groups. Good calibration means scores are trustworthy.",
        context: "Important when using risk scores or probability estimates that inform human decision-making.",
        required_columns: SCORES,
        visualization_type: VisualizationType::Heatmap,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Well-calibrated",
            warning: "Mild calibration drift",
            violation: "Score unreliable",
        },
        guidance: Guidance {
            what_this_means: "Same score means different outcomes across groups.",
            what_is_wrong: "AI score is unreliable. Trust in ATS is compromised.",
            watch_what_is_wrong: "Scores are somewhat less reliable for one group.",
            root_causes: &[
                "Score trained on biased labels",
                "Unequal representation in training data",
            ],
            recruiter_actions: &[
                "Retrain scoring model with balanced data",
                "Calibrate scores separately by group",
                "Avoid strict score cutoffs",
            ],
            dashboard_recommendation: "Screening scores are not equally predictive across groups. Model recalibration is recommended.",
            watch_recommendation: "Screening scores show mild calibration drift between groups. Track calibration over the next hiring cycle.",
        },
    },
    MetricSpec {
        id: MetricId::FalseNegativeRateParity,
        display_name: "False Negative Rate Parity",
        definition: "Ensures that the rate of missing qualified candidates (false negatives) is equal across groups.",
        interpretation: "The proportion of qualified candidates who are incorrectly rejected should be similar across groups.",
        context: "Critical when missing qualified candidates has significant negative consequences (e.g., talent loss, diversity goals).",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Bar,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Equal rejection errors",
            warning: "Talent loss risk",
            violation: "Systematic rejection",
        },
        guidance: Guidance {
            what_this_means: "One group has higher rate of qualified candidates being wrongly rejected.",
            what_is_wrong: "Talent loss. Unfair exclusion.",
            watch_what_is_wrong: "Qualified candidates in one group are rejected slightly more often.",
            root_causes: &[
                "Conservative thresholds",
                "Poor skill extraction for certain groups",
            ],
            recruiter_actions: &[
                "Lower rejection thresholds for borderline cases",
                "Add second-stage review",
                "Improve resume parsing logic",
            ],
            dashboard_recommendation: "Higher rejection errors for a group indicate potential talent loss. Review rejection thresholds.",
            watch_recommendation: "Rejection errors are uneven across groups. Consider a second-stage review for borderline cases.",
        },
    },
    MetricSpec {
        id: MetricId::FalseDiscoveryRateParity,
        display_name: "False Discovery Rate Parity",
        definition: "Ensures that among those selected, the proportion who are unqualified is equal across groups.",
        interpretation: "The 'error rate' among selected candidates should be consistent across groups. Similar FDR values indicate fairness.",
        context: "Important when you want to ensure equal quality among selected candidates from different groups.",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Bar,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Consistent shortlist quality",
            warning: "Uneven reliability",
            violation: "Poor hiring quality",
        },
        guidance: Guidance {
            what_this_means: "Shortlisted candidates from one group are less reliable.",
            what_is_wrong: "Shortlisting quality varies. Hiring inefficiency.",
            watch_what_is_wrong: "Shortlisting quality is starting to differ between groups.",
            root_causes: &["Bias in resume keyword matching", "Uneven scoring noise"],
            recruiter_actions: &[
                "Strengthen validation of shortlisted candidates",
                "Use skill-based assessments",
                "Reduce over-reliance on AI scores",
            ],
            dashboard_recommendation: "Shortlisting reliability differs across groups. Review validation mechanisms.",
            watch_recommendation: "Shortlisting reliability varies slightly across groups. Spot-check shortlisted candidates.",
        },
    },
    MetricSpec {
        id: MetricId::AccuracyEquality,
        display_name: "Accuracy Equality",
        definition: "Ensures that the overall prediction accuracy is equal across all groups.",
        interpretation: "The model should perform equally well for all groups. Differences in accuracy indicate potential bias.",
        context: "Use as a general fairness check. However, equal accuracy doesn't guarantee fairness in all error types.",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Bar,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Equal system performance",
            warning: "Uneven performance",
            violation: "System favors one group",
        },
        guidance: Guidance {
            what_this_means: "The AI system performs better for one group.",
            what_is_wrong: "Unequal system performance. Model favors dominant group.",
            watch_what_is_wrong: "System performance is slightly uneven across groups.",
            root_causes: &["Data imbalance", "Overfitting to majority group patterns"],
            recruiter_actions: &[
                "Balance training data",
                "Perform group-wise performance testing",
                "Avoid deploying model without fairness validation",
            ],
            dashboard_recommendation: "Prediction accuracy differs across groups. Indicates unequal system performance.",
            watch_recommendation: "Prediction accuracy is uneven across groups. Add group-wise performance testing.",
        },
    },
    MetricSpec {
        id: MetricId::PredictiveParityPpv,
        display_name: "Predictive Parity (PPV)",
        definition: "Ensures that the Positive Predictive Value (precision) is equal across groups - i.e., among those selected, the success rate is equal.",
        interpretation: "Among shortlisted candidates, the actual qualification rate should be similar across groups.",
        context: "Important when you want to ensure that selection decisions have equal predictive validity across groups.",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Bar,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Equal confidence",
            warning: "Uneven confidence",
            violation: "Biased confidence",
        },
        guidance: Guidance {
            what_this_means: "Shortlisted candidates from one group are more likely to be truly qualified.",
            what_is_wrong: "Hiring confidence differs by group. Biased talent perception.",
            watch_what_is_wrong: "Confidence in shortlisted candidates varies mildly by group.",
            root_causes: &["Score calibration issues", "Threshold inconsistencies"],
            recruiter_actions: &[
                "Align confidence thresholds",
                "Improve model calibration",
                "Standardize evaluation criteria",
            ],
            dashboard_recommendation: "Shortlisting precision differs across groups. Indicates unequal confidence in selections.",
            watch_recommendation: "Shortlisting precision is uneven across groups. Align confidence thresholds.",
        },
    },
    MetricSpec {
        id: MetricId::EqualizedOdds,
        display_name: "Equalized Odds",
        definition: "Ensures that both True Positive Rate and False Positive Rate are equal across groups. This is a combination of equal opportunity and predictive equality.",
        interpretation: "Both qualified and unqualified candidates should have equal error rates across groups. This is a strong fairness criterion.",
        context: "Use when you want comprehensive fairness that accounts for both types of errors. Often considered one of the most rigorous fairness metrics.",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Scatter,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Balanced errors",
            warning: "Partial imbalance",
            violation: "Structural bias",
        },
        guidance: Guidance {
            what_this_means: "Overall error behavior is biased.",
            what_is_wrong: "One group is both favored and protected from errors.",
            watch_what_is_wrong: "Error rates are partly imbalanced between groups.",
            root_causes: &["Structural bias in scoring pipeline"],
            recruiter_actions: &[
                "Re-design scoring pipeline",
                "Use fairness-aware optimization",
                "Apply post-processing corrections",
            ],
            dashboard_recommendation: "Error rates differ across groups. Comprehensive fairness correction required.",
            watch_recommendation: "Error rates are partially imbalanced across groups. Review the scoring pipeline.",
        },
    },
    MetricSpec {
        id: MetricId::StatisticalParityDifference,
        display_name: "Statistical Parity Difference",
        definition: "Measures the absolute difference in selection rates between the most and least favored groups.",
        interpretation: "Values close to 0 indicate fairness. Typically, |SPD| < 0.1 is considered fair.",
        context: "A simple, interpretable metric for measuring outcome differences. Good for initial bias screening.",
        required_columns: SELECTION,
        visualization_type: VisualizationType::Metric,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Minimal disparity",
            warning: "Moderate disparity",
            violation: "Strong disparity",
        },
        guidance: Guidance {
            what_this_means: "Clear imbalance in outcomes.",
            what_is_wrong: "Systematic bias.",
            watch_what_is_wrong: "Outcome differences between groups are emerging.",
            root_causes: &["Biased selection process", "Unfair thresholds"],
            recruiter_actions: &[
                "Review entire screening workflow",
                "Introduce fairness constraints",
            ],
            dashboard_recommendation: "Statistical parity difference is significant. Review entire screening workflow and introduce fairness constraints.",
            watch_recommendation: "Statistical parity difference is moderate. Keep the screening workflow under review.",
        },
    },
    MetricSpec {
        id: MetricId::AverageOddsDifference,
        display_name: "Average Odds Difference",
        definition: "Measures the average of the absolute differences in False Positive Rate and True Positive Rate between groups.",
        interpretation: "Values close to 0 indicate fairness. This metric balances both types of errors.",
        context: "Use when you want a single metric that captures both opportunity and predictive equality.",
        required_columns: OUTCOMES,
        visualization_type: VisualizationType::Metric,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Minimal error difference",
            warning: "Unequal errors",
            violation: "Serious bias",
        },
        guidance: Guidance {
            what_this_means: "Combined error imbalance.",
            what_is_wrong: "Both acceptance and rejection errors are biased.",
            watch_what_is_wrong: "Acceptance or rejection errors lean toward one group.",
            root_causes: &["Systematic scoring bias", "Poorly calibrated thresholds"],
            recruiter_actions: &[
                "Address both acceptance and rejection bias",
                "Adjust thresholds + retraining",
            ],
            dashboard_recommendation: "Average odds difference indicates combined error imbalance. Address both acceptance and rejection bias through threshold adjustment and retraining.",
            watch_recommendation: "Average odds difference shows unequal errors. Revisit acceptance and rejection thresholds.",
        },
    },
    MetricSpec {
        id: MetricId::TheilIndex,
        display_name: "Theil Index",
        definition: "Measures inequality in the distribution of positive outcomes relative to group representation. Based on information theory.",
        interpretation: "Values close to 0 indicate fairness. Higher values indicate greater inequality in outcome distribution.",
        context: "Useful for understanding overall distributional fairness across multiple groups simultaneously.",
        required_columns: SELECTION,
        visualization_type: VisualizationType::Metric,
        policy: AssessmentPolicy::Difference,
        segments: SegmentLabels {
            fair: "Low inequality",
            warning: "Moderate inequality",
            violation: "High inequality",
        },
        guidance: Guidance {
            what_this_means: "Outcomes are highly unequal.",
            what_is_wrong: "Structural inequality amplified by AI.",
            watch_what_is_wrong: "Outcome inequality is moderate and may grow.",
            root_causes: &["Biased historical data", "Over-filtering certain groups"],
            recruiter_actions: &[
                "Review hiring volume & thresholds",
                "Reduce over-filtering",
                "Improve inclusivity measures",
            ],
            dashboard_recommendation: "Theil Index indicates high inequality. Review hiring volume, reduce over-filtering, and improve inclusivity measures.",
            watch_recommendation: "Theil Index indicates moderate inequality. Review hiring volume and filtering.",
        },
    },
];

/// Every metric in catalog order.
pub fn list_metric_specs() -> &'static [MetricSpec] {
    &METRIC_SPECS
}

/// Look up a metric by id.
pub fn spec(id: MetricId) -> &'static MetricSpec {
    // ALL and METRIC_SPECS share an order.
    &METRIC_SPECS[id as usize]
}

/// Look up a metric by name (case-insensitive).
pub fn find_spec(name: &str) -> Option<&'static MetricSpec> {
    name.parse::<MetricId>().ok().map(spec)
}
