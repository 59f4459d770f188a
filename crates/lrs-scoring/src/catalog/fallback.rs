use super::{InterventionPlan, SchemaMetadata};

struct FallbackSchema {
    name: &'static str,
    category: &'static str,
    causes: &'static str,
    symptoms: &'static str,
    manifestations: &'static str,
    plan: [&'static str; 4],
}

impl FallbackSchema {
    fn to_metadata(&self) -> SchemaMetadata {
        SchemaMetadata {
            name: self.name.to_string(),
            category: self.category.to_string(),
            causes: self.causes.to_string(),
            symptoms: self.symptoms.to_string(),
            manifestations: self.manifestations.to_string(),
            plan: InterventionPlan::from_weeks(self.plan),
        }
    }
}

pub(super) fn standard_entries() -> Vec<SchemaMetadata> {
    FALLBACK_SCHEMAS
        .iter()
        .map(FallbackSchema::to_metadata)
        .collect()
}

const DISCONNECTION: &str = "Disconnection & Rejection";
const IMPAIRED_AUTONOMY: &str = "Impaired Autonomy & Performance";
const IMPAIRED_LIMITS: &str = "Impaired Limits";
const OTHER_DIRECTEDNESS: &str = "Other-Directedness";
const OVERVIGILANCE: &str = "Overvigilance & Inhibition";

const FALLBACK_SCHEMAS: &[FallbackSchema] = &[
    // Disconnection & Rejection
    FallbackSchema {
        name: "Abandonment / Instability",
        category: DISCONNECTION,
        causes: "Unstable or unreliable caregiving; early loss or parent absence.",
        symptoms: "Intense fear of loss, clinginess, jealousy, or withdrawal.",
        manifestations: "Connection (attachment worry), Roots (parent loss), Stability (world anxiety)",
        plan: [
            "Trigger Mapping: Record every time you feel 'abandonment panic'. Note the objective trigger vs. the internal fear.",
            "The Healthy Adult Voice: Practice the thought: 'I am an adult now. Even if this person leaves, I can care for myself.'",
            "Planned Separation: Spend an evening alone without checking social media. Practice self-soothing in the silence.",
            "Relapse Prevention: Identify 3 healthy ways to ask for reassurance without testing or accusing your partner.",
        ],
    },
    FallbackSchema {
        name: "Mistrust / Abuse",
        category: DISCONNECTION,
        causes: "Abuse, betrayal, or manipulation by caregivers or peers.",
        symptoms: "Expectation of harm, hypervigilance, difficulty trusting, testing others.",
        manifestations: "Roots (trauma items), Connection (trust difficulty), Environment (safety)",
        plan: [
            "Evidence Checking: Pick one person you distrust. List evidence 'for' and 'against' the belief they intend harm.",
            "Boundary Training: Practice saying 'I’m not comfortable with that' to minor requests to build internal safety.",
            "Vulnerability Experiment: Share one minor personal opinion with a safe person. Observe the safety.",
            "Trust Pacing: Categorize people into 'Trust Levels' (1-5). Share only level-appropriate info.",
        ],
    },
    FallbackSchema {
        name: "Emotional Deprivation",
        category: DISCONNECTION,
        causes: "Lack of nurturance, empathy, or affection from caregivers.",
        symptoms: "Feeling chronically lonely, 'no one is there for me', choosing distant partners.",
        manifestations: "Connection (closeness/intimacy), Roots (neglect/affection lack), Vitality (mood)",
        plan: [
            "Need Awareness: Every time you feel empty, write down what you needed: Empathy, Protection, or Nurturance.",
            "Cognitive Flashcard: Create a card: 'My feeling that no one cares is a schema memory, not a current fact.'",
            "Active Request: Ask a trusted person for 10 minutes of active listening regarding a small stressor.",
            "Inner Nurturing: Schedule one activity weekly that feels 'nurturing' to your inner child.",
        ],
    },
    FallbackSchema {
        name: "Defectiveness / Shame",
        category: DISCONNECTION,
        causes: "Criticism, rejection, or shaming; feeling inherently flawed.",
        symptoms: "Deep shame, self-loathing, hypersensitivity to criticism, hiding 'defects', self-sabotage in relationships.",
        manifestations: "Digital Wellbeing (comparison), Meaning (self-worth), Roots (insults/shame)",
        plan: [
            "Critic Audit: Name your inner critic (e.g., 'The Judge'). Note how often it speaks and the words it uses.",
            "Humanity Re-framing: When you make a mistake, say: 'This is a common human experience, not a defect.'",
            "Mirror Work: Spend 2 minutes daily looking at yourself saying: 'I am worthy of kindness regardless of flaws.'",
            "Compassionate Letter: Write a letter to yourself from the perspective of a wise friend regarding a past mistake.",
        ],
    },
    FallbackSchema {
        name: "Social Isolation / Alienation",
        category: DISCONNECTION,
        causes: "Feeling different or excluded from family/peers.",
        symptoms: "Sense of being outsider, avoidance of groups despite longing, feeling no one understands.",
        manifestations: "Connection (outsider feelings), Environment (spaces/personal identity), Digital Wellbeing (comparison)",
        plan: [
            "Similarity Search: In every social setting, find 3 things you have in common with others.",
            "Small Talk Script: Prepare 3 open-ended questions to use in conversations.",
            "Group Activity: Attend one low-pressure social event (e.g., class, meetup).",
            "Reflection: Write what went better than expected and plan next social step.",
        ],
    },
    // Impaired Autonomy & Performance
    FallbackSchema {
        name: "Dependence / Incompetence",
        category: IMPAIRED_AUTONOMY,
        causes: "Overprotection or discouragement of independence.",
        symptoms: "Belief one is incapable, excessive reliance on others, avoidance of responsibility, helplessness.",
        manifestations: "Growth (coping/capability), Vitality (focus/energy), Roots (parentification)",
        plan: [
            "Competence Log: Track 5 daily tasks you completed independently.",
            "Decision Practice: Make 3 small decisions without asking for advice.",
            "Skill Building: Choose one simple task you've avoided and complete it step-by-step.",
            "Reflection: List evidence of your growing capability.",
        ],
    },
    FallbackSchema {
        name: "Vulnerability to Harm or Illness",
        category: IMPAIRED_AUTONOMY,
        causes: "Exaggerated danger or traumatic events.",
        symptoms: "Catastrophizing, excessive precaution, phobias, hypochondria.",
        manifestations: "Vitality (health/resilience), Environment (safety/noise/light), Stability (world anxiety)",
        plan: [
            "Worry Time: Schedule 15 minutes daily to write all worries, then stop.",
            "Probability Estimation: Rate likelihood of feared event (0-100%) and check evidence.",
            "Exposure Step: Face one small feared situation (e.g., short trip).",
            "Safety Review: List all times feared event did NOT happen.",
        ],
    },
    FallbackSchema {
        name: "Enmeshment / Undeveloped Self",
        category: IMPAIRED_AUTONOMY,
        causes: "Over-involved caregivers; no separate identity encouraged.",
        symptoms: "Lack of individual direction, guilt when separate, fusion with others' emotions/needs.",
        manifestations: "Connection (preoccupation), Meaning (choices/values), Roots (household mental illness)",
        plan: [
            "Identity List: Write 10 things you like that are independent of others.",
            "Boundary Practice: Say 'I need time to think' to one request.",
            "Solo Activity: Spend 2 hours on a personal interest without sharing.",
            "Reflection: Notice how separate choices feel empowering.",
        ],
    },
    FallbackSchema {
        name: "Failure",
        category: IMPAIRED_AUTONOMY,
        causes: "Criticism or comparison leading to belief in inevitable failure.",
        symptoms: "Avoidance of challenges, self-sabotage, underachievement despite ability.",
        manifestations: "Growth (achievement/perfection), Stability (financial plan), Vitality (energy)",
        plan: [
            "Success Inventory: List 10 past achievements, big or small.",
            "Growth Mindset: Replace 'I failed' with 'I learned'.",
            "Small Challenge: Complete one avoided task with realistic goal.",
            "Celebrate Effort: Reward process, not just outcome.",
        ],
    },
    // Impaired Limits
    FallbackSchema {
        name: "Entitlement / Grandiosity",
        category: IMPAIRED_LIMITS,
        causes: "Overindulgence or lack of limits.",
        symptoms: "Belief one is superior, demands special treatment, lack of empathy/reciprocal responsibility.",
        manifestations: "Growth (deservingness/empathy), Digital Wellbeing (rules/control)",
        plan: [
            "Empathy Log: Note one need of another person daily.",
            "Equality Reminder: 'Everyone's needs matter equally'.",
            "Delay Gratification: Wait 24h for one non-essential want.",
            "Gratitude Practice: Thank someone for meeting a reasonable need.",
        ],
    },
    FallbackSchema {
        name: "Insufficient Self-Control / Self-Discipline",
        category: IMPAIRED_LIMITS,
        causes: "Lack of structure or consequences.",
        symptoms: "Difficulty tolerating frustration, impulsivity, avoidance of discomfort needed for goals.",
        manifestations: "Digital Wellbeing (scrolling/notifications), Stability (savings), Growth (procrastination)",
        plan: [
            "Impulse Log: Track urges and delay action by 10 minutes.",
            "If-Then Planning: 'If I feel urge to scroll, then I stand up and stretch'.",
            "Commitment Device: Use app blocker for one habit.",
            "Reward System: Plan healthy reward after completing task.",
        ],
    },
    // Other-Directedness
    FallbackSchema {
        name: "Subjugation",
        category: OTHER_DIRECTEDNESS,
        causes: "Punishment for asserting needs; dominance in family.",
        symptoms: "Suppression of anger/needs to avoid retaliation, passive compliance, bottled resentment.",
        manifestations: "Connection (suppression/peace), Growth (conflict avoidance)",
        plan: [
            "Need Awareness: Write down 3 suppressed wants daily.",
            "Low-Risk Assertion: Express one small preference ('I’d prefer X').",
            "Anger Journal: Safely write unsent letter expressing resentment.",
            "Boundary Setting: Practice 'No' to one reasonable request.",
        ],
    },
    FallbackSchema {
        name: "Self-Sacrifice",
        category: OTHER_DIRECTEDNESS,
        causes: "Guilt or modeling of excessive giving.",
        symptoms: "Over-focus on others' needs, neglect own, resentment, burnout.",
        manifestations: "Meaning (helping/meaning), Connection (preoccupation), Roots (parentification)",
        plan: [
            "Giving Audit: Track time/energy given vs. received.",
            "Self-Care Priority: Schedule one non-negotiable self-need daily.",
            "Balanced Helping: Offer help only when you genuinely want to.",
            "Guilt Reframe: 'Meeting my needs allows me to help others sustainably.'",
        ],
    },
    FallbackSchema {
        name: "Approval-Seeking / Recognition-Seeking",
        category: OTHER_DIRECTEDNESS,
        causes: "Love conditional on performance/appearance.",
        symptoms: "Excessive need for admiration, identity based on external validation, conformity.",
        manifestations: "Digital Wellbeing (validation/likes), Meaning (respect), Growth (worth)",
        plan: [
            "Validation Source: List 5 internal qualities you value in yourself.",
            "Social Media Fast: 1 day without seeking likes/comments.",
            "Intrinsic Goal: Do one activity for personal enjoyment, not sharing.",
            "Self-Approval Practice: Daily affirm 'My worth is inherent'.",
        ],
    },
    // Overvigilance & Inhibition
    FallbackSchema {
        name: "Negativity / Pessimism",
        category: OVERVIGILANCE,
        causes: "Focus on negative in family; repeated hardship.",
        symptoms: "Chronic focus on negatives, worry, discounting positives, life feels bleak.",
        manifestations: "Vitality (mood/energy), Stability (world anxiety), Meaning (gratitude/peace)",
        plan: [
            "3 Good Things: Write 3 positive events daily and why they happened.",
            "Evidence Testing: For one worry, list evidence for/against.",
            "Gratitude Visit: Write and deliver (or read) a gratitude letter.",
            "Best Possible Self: Visualize and write about your ideal future.",
        ],
    },
    FallbackSchema {
        name: "Emotional Inhibition",
        category: OVERVIGILANCE,
        causes: "Suppression of emotions shamed or punished.",
        symptoms: "Restraint of feelings, fear of losing control, appear rigid/cold, difficulty with spontaneity.",
        manifestations: "Connection (hiding feelings), Digital Wellbeing (curating self), Vitality (mood)",
        plan: [
            "Emotion Labeling: Name feelings 5 times daily.",
            "Safe Expression: Share one feeling with a trusted person.",
            "Body Awareness: Notice where emotions live in your body.",
            "Play Experiment: Do one spontaneous, fun activity.",
        ],
    },
    FallbackSchema {
        name: "Unrelenting Standards / Hypercriticalness",
        category: OVERVIGILANCE,
        causes: "High pressure for performance; criticism for imperfection.",
        symptoms: "Perfectionism, chronic dissatisfaction, burnout, harsh self/other judgment.",
        manifestations: "Growth (perfection/strive), Meaning (peace), Connection (suppression)",
        plan: [
            "Standards Audit: List your 'shoulds' and question necessity.",
            "Good Enough Goal: Complete one task to 80% standard deliberately.",
            "Self-Compassion Break: Use Kristin's phrase during criticism.",
            "Balance Review: Schedule equal time for achievement and rest.",
        ],
    },
    FallbackSchema {
        name: "Punitiveness",
        category: OVERVIGILANCE,
        causes: "Harsh punishment; intolerance of mistakes.",
        symptoms: "Self-punishing or punitive toward others, difficulty forgiving errors.",
        manifestations: "Vitality (guilt/appetite), Growth (critical mistakes), Roots (cruel discipline)",
        plan: [
            "Mistake Log: Write mistakes without judgment.",
            "Forgiveness Letter: Write (unsent) forgiving yourself or another.",
            "Mercy Practice: Respond to one mistake with kindness phrase.",
            "Common Humanity: Remind 'Everyone makes mistakes' daily.",
        ],
    },
];
