//! Ad script and storyboard synthesis.
//!
//! Deterministic template expansion from the creative brief: the archetype
//! picks the opening line, mood and energy pick the tone words, and the
//! storyboard is a fixed six-beat arc (hook, problem, solution,
//! transformation, social proof, call to action) totalling ~60 seconds.

use adforge_models::{AdBrief, Scene};

/// Synthesize the script text and its six-scene storyboard.
pub fn synthesize(brief: &AdBrief) -> (String, Vec<Scene>) {
    let intro = brief
        .archetype
        .intro_template()
        .replace("{product}", &brief.product_name);

    let tone = brief.tone_word();
    let pace = brief.pace_word();

    let audience_line = match non_empty(brief.target_audience.as_deref()) {
        Some(audience) => format!("Target Audience: {audience}"),
        None => String::new(),
    };
    let cta = non_empty(brief.call_to_action.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Get {} today!", brief.product_name));

    let script = format!(
        "[{style} STYLE - {tone}, {pace} PACE]\n\
         \n\
         OPENING (0:00-0:10):\n\
         {intro}\n\
         \n\
         SCENE 1 - THE HOOK:\n\
         Open with an attention-grabbing visual that introduces the world of {product}.\n\
         {audience_line}\n\
         \n\
         SCENE 2 - THE PROBLEM:\n\
         Show the pain point that {product} solves. Make viewers feel understood.\n\
         \n\
         SCENE 3 - THE SOLUTION:\n\
         Reveal {product} as the answer. Highlight key features and benefits.\n\
         {description}\n\
         \n\
         SCENE 4 - THE TRANSFORMATION:\n\
         Show the before/after. Demonstrate the positive change {product} brings.\n\
         \n\
         SCENE 5 - SOCIAL PROOF:\n\
         Quick testimonials or user reactions that build trust and credibility.\n\
         \n\
         SCENE 6 - CALL TO ACTION:\n\
         {cta}\n\
         Strong closing with logo and CTA overlay.\n\
         \n\
         [END OF SCRIPT - ~60 seconds total]",
        style = brief.style.as_str().to_uppercase(),
        tone = tone.to_uppercase(),
        pace = pace.to_uppercase(),
        product = brief.product_name,
        description = brief.description,
    );

    (script, storyboard(brief, &cta))
}

fn storyboard(brief: &AdBrief, cta: &str) -> Vec<Scene> {
    let product = &brief.product_name;
    let style = brief.style.as_str();

    let solution_narration = if brief.description.chars().count() > 50 {
        let head: String = brief.description.chars().take(50).collect();
        format!("{product} changes everything. {head}...")
    } else {
        brief.description.clone()
    };

    vec![
        scene(
            format!("Opening hook - Introduce {product} with stunning {style} visuals"),
            10,
            format!("What if there was a better way? Introducing {product}."),
            "hook",
            vec!["hook".into(), "intro".into(), style.into()],
        ),
        scene(
            "Show the problem your audience faces daily".to_string(),
            8,
            "We've all been there. The frustration. The struggle.".to_string(),
            "problem",
            vec!["problem".into(), "emotional".into()],
        ),
        scene(
            format!("Reveal {product} as the solution"),
            12,
            solution_narration,
            "solution",
            vec!["solution".into(), "product".into(), "features".into()],
        ),
        scene(
            "Show the transformation and results".to_string(),
            12,
            "See the difference. Feel the change.".to_string(),
            "transformation",
            vec![
                "transformation".into(),
                "results".into(),
                "before-after".into(),
            ],
        ),
        scene(
            "Social proof and testimonials".to_string(),
            8,
            "Join thousands who already made the switch.".to_string(),
            "social-proof",
            vec!["testimonial".into(), "trust".into(), "social-proof".into()],
        ),
        scene(
            format!("Call to action - {cta}"),
            10,
            non_empty(brief.call_to_action.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Get {product} now. Limited time offer!")),
            "cta",
            vec!["cta".into(), "closing".into(), "logo".into()],
        ),
    ]
}

fn scene(
    description: String,
    duration: u32,
    narration: String,
    visual_tag: &str,
    tags: Vec<String>,
) -> Scene {
    let mut s = Scene::new(description, duration);
    s.narration = Some(narration);
    s.visual_tag = Some(visual_tag.to_string());
    s.tags = tags;
    s
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}
