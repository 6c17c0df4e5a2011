//! Prompt templates
//!
//! Free-text prompt assembly for the insight engine. The templates carry
//! the schema summary, the executed query, and the rendered result table;
//! the model's reply is passed through untouched.

use super::InsightContext;

pub(super) const BUSINESS_SYSTEM: &str =
    "You are a business intelligence expert specializing in graph data analysis.";

pub(super) const ANALYST_SYSTEM: &str =
    "You are a data scientist expert in pattern recognition and graph analysis.";

pub(super) const STRATEGY_SYSTEM: &str =
    "You are a senior product manager with expertise in platform strategy for knowledge-graph and AI-augmented analytics products.";

fn context_block(ctx: &InsightContext<'_>) -> String {
    format!(
        "**Graph Schema:**\n{}\n\n**Query Executed:**\n{}\n\n**Query Results ({}):**\n{}",
        ctx.schema.summary(),
        ctx.query,
        ctx.result.summary,
        ctx.result.table.to_text()
    )
}

pub(super) fn business_insights(ctx: &InsightContext<'_>) -> String {
    format!(
        "Analyze the following graph schema, query, and results to provide actionable insights.\n\n\
         {}\n\n\
         **Task:** Provide 3-5 actionable business insights based on this data. Focus on:\n\
         1. Patterns and trends in the data\n\
         2. Potential business opportunities\n\
         3. Risk indicators or areas of concern\n\
         4. Recommendations for action\n\
         5. Questions that could be explored further\n\n\
         Format your response as a structured analysis with clear sections.",
        context_block(ctx)
    )
}

pub(super) fn pattern_analysis(ctx: &InsightContext<'_>) -> String {
    format!(
        "Examine the following data and identify interesting patterns, anomalies, or correlations.\n\n\
         {}\n\n\
         **Task:** Identify and explain:\n\
         1. Data distribution patterns\n\
         2. Potential correlations between entities\n\
         3. Anomalies or outliers\n\
         4. Seasonal or temporal patterns\n\
         5. Network effects or cascading relationships\n\n\
         Provide specific examples from the data to support your analysis.",
        context_block(ctx)
    )
}

pub(super) fn recommendations(ctx: &InsightContext<'_>) -> String {
    format!(
        "Based on the following analysis, produce concrete next steps.\n\n\
         {}\n\n\
         **Task:** Provide 3-5 prioritized recommendations. For each one state\n\
         the action, the expected impact, and how to measure success.",
        context_block(ctx)
    )
}

pub(super) fn roadmap_suggestions(ctx: &InsightContext<'_>, prior_insights: Option<&str>) -> String {
    format!(
        "Generate strategic product roadmap suggestions for a knowledge-graph analytics platform.\n\n\
         {}\n\n\
         **AI Insights (if available):**\n{}\n\n\
         **Task:** Generate 3-5 roadmap suggestions covering feature enhancements,\n\
         platform improvements, AI/ML integration, developer experience, and\n\
         business intelligence. For each suggestion provide: feature name,\n\
         problem statement, proposed solution, business impact, implementation\n\
         priority (High/Medium/Low), estimated timeline, and success metrics.",
        context_block(ctx),
        prior_insights.unwrap_or("No AI insights available")
    )
}
