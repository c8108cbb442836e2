//! Prompt templates for the improvement pipeline. Placeholders in `{braces}`
//! are substituted with `str::replace` before the call.

pub const IMPROVER_SYSTEM: &str =
    "You are an expert CV writer specializing in the MENA and Sub-Saharan African job markets. \
     Return only the rewritten content, with no preamble.";

pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"
ORIGINAL TEXT:
{text}

ISSUES IDENTIFIED:
- Weak/passive verbs found: {weak_verbs}
- Has quantifiable metrics: {has_metrics}

YOUR TASK:
Rewrite this experience section following these rules:

1. START EACH BULLET with a STRONG action verb (past tense): Led, Developed, Implemented, Achieved, Optimized, etc.
2. ADD QUANTIFIABLE RESULTS wherever possible:
   - Numbers: "Managed team of 8"
   - Percentages: "Increased efficiency by 30%"
   - Scale: "Serving 10,000+ users"
   - Time: "Reduced processing time from 5h to 2h"
3. USE the XYZ formula: "Accomplished [X] as measured by [Y], by doing [Z]"
4. KEEP it concise: 1-2 lines per bullet point
5. FOCUS on impact and results, not just tasks
6. CONTEXT: Adapt language for African/MENA employers

{language_instruction}

IMPROVED VERSION:
"#;

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"
Based on this CV excerpt, create a compelling professional summary (3-4 sentences):

CV EXCERPT:
{text}

EXPERIENCE: {experience_years} years

REQUIREMENTS:
1. Start with job title/role and years of experience
2. Highlight 2-3 key strengths or achievements
3. Mention 2-3 core technical/professional skills
4. End with career goal or value proposition
5. Make it relevant for MENA/Sub-Saharan Africa job market
6. Be specific and impactful, avoid generic phrases
7. Keep it under 80 words

{language_instruction}

PROFESSIONAL SUMMARY:
"#;

pub const SKILLS_PROMPT_TEMPLATE: &str = r#"
Reorganize and enhance this skills section for maximum impact:

ORIGINAL:
{text}

REQUIREMENTS:
1. Group skills into clear categories (Technical, Languages, Tools, Soft Skills, etc.)
2. List most relevant/strongest skills first
3. Add proficiency levels where relevant (Expert, Advanced, Intermediate)
4. Remove redundant or outdated skills
5. Use consistent formatting
6. Keep it scannable and ATS-friendly
7. Context: MENA/Sub-Saharan Africa job market

{language_instruction}

FORMAT:
**Category Name**
- Skill 1 (Proficiency level)
- Skill 2 (Proficiency level)

IMPROVED SKILLS SECTION:
"#;

pub const BULLETS_PROMPT_TEMPLATE: &str = r#"
Based on this experience text, generate 5 PERFECT bullet points that demonstrate impact:

TEXT:
{text}

RULES:
1. Each bullet MUST follow: [Strong Action Verb] + [What you did] + [Quantifiable Result]
2. Use numbers, percentages, scale, timeframes
3. Show IMPACT, not just responsibilities
4. Keep each bullet 15-25 words
5. Use past tense action verbs
6. Make them ATS-friendly
7. Relevant for African/MENA job market

{language_instruction}

PROVIDE EXACTLY 5 BULLET POINTS:
"#;
