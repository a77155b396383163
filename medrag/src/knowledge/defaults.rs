//! Built-in rule tables.

use super::{DurationMarkers, EscalationCluster, LexiconEntry, SymptomProfile};
use crate::models::{EntityCategory, Urgency};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// One entry per phrase, each phrase being its own canonical form.
fn literal_entries(category: EntityCategory, phrases: &[&str]) -> Vec<LexiconEntry> {
    phrases
        .iter()
        .map(|phrase| LexiconEntry::new(phrase, category, &[phrase]))
        .collect()
}

pub(super) fn lexicon() -> Vec<LexiconEntry> {
    let mut lexicon = Vec::new();
    lexicon.extend(symptom_entries());
    lexicon.extend(body_part_entries());
    lexicon.extend(condition_entries());
    lexicon.extend(medication_entries());
    lexicon.extend(temporal_entries());
    lexicon.extend(severity_entries());
    lexicon.extend(urgency_cue_entries());
    lexicon
}

fn symptom_entries() -> Vec<LexiconEntry> {
    use EntityCategory::Symptom;

    vec![
        LexiconEntry::new(
            "chest pain",
            Symptom,
            &[
                "chest pain",
                "chest pains",
                "chest tightness",
                "chest pressure",
                "chest ache",
                "heart pain",
                "tight chest",
                "tightness in my chest",
                "pressure in my chest",
                "pain in my chest",
                "crushing chest",
                "crushing chest pain",
            ],
        ),
        LexiconEntry::new(
            "shortness of breath",
            Symptom,
            &[
                "shortness of breath",
                "short of breath",
                "breathless",
                "breathlessness",
                "trouble breathing",
                "difficulty breathing",
                "hard to breathe",
                "out of breath",
                "wheezing",
                "gasping",
            ],
        ),
        LexiconEntry::new(
            "headache",
            Symptom,
            &[
                "headache",
                "headaches",
                "head pain",
                "head ache",
                "head hurts",
                "pounding head",
            ],
        ),
        LexiconEntry::new(
            "fever",
            Symptom,
            &[
                "fever",
                "feverish",
                "high temperature",
                "a temperature",
                "running a temperature",
                "burning up",
            ],
        ),
        LexiconEntry::new("chills", Symptom, &["chills", "shivering", "shivers"]),
        LexiconEntry::new(
            "abdominal pain",
            Symptom,
            &[
                "abdominal pain",
                "stomach pain",
                "stomach ache",
                "stomachache",
                "belly pain",
                "tummy ache",
                "pain in my stomach",
                "pain in my belly",
                "pain in my abdomen",
                "stomach cramps",
            ],
        ),
        LexiconEntry::new(
            "nausea",
            Symptom,
            &[
                "nausea",
                "nauseous",
                "nauseated",
                "queasy",
                "sick to my stomach",
                "feel sick",
                "feeling sick",
            ],
        ),
        LexiconEntry::new(
            "vomiting",
            Symptom,
            &["vomiting", "vomit", "vomited", "throwing up", "threw up"],
        ),
        LexiconEntry::new(
            "diaphoresis",
            Symptom,
            &[
                "sweating",
                "sweaty",
                "cold sweat",
                "cold sweats",
                "clammy",
                "diaphoresis",
            ],
        ),
        LexiconEntry::new(
            "dizziness",
            Symptom,
            &[
                "dizzy",
                "dizziness",
                "lightheaded",
                "light headed",
                "vertigo",
                "room spinning",
            ],
        ),
        LexiconEntry::new(
            "fainting",
            Symptom,
            &[
                "fainted",
                "fainting",
                "passed out",
                "passing out",
                "blacked out",
                "lost consciousness",
            ],
        ),
        LexiconEntry::new("cough", Symptom, &["cough", "coughing", "coughs"]),
        LexiconEntry::new(
            "sore throat",
            Symptom,
            &["sore throat", "throat pain", "scratchy throat"],
        ),
        LexiconEntry::new(
            "fatigue",
            Symptom,
            &["fatigue", "fatigued", "tired", "exhausted", "exhaustion", "worn out"],
        ),
        LexiconEntry::new("weakness", Symptom, &["weakness", "weak"]),
        LexiconEntry::new(
            "palpitations",
            Symptom,
            &[
                "palpitations",
                "racing heart",
                "heart racing",
                "heart is racing",
                "pounding heart",
                "heart pounding",
                "fluttering",
            ],
        ),
        LexiconEntry::new(
            "arm pain",
            Symptom,
            &[
                "arm pain",
                "pain in my arm",
                "pain down my arm",
                "pain in my left arm",
                "left arm pain",
                "arm ache",
            ],
        ),
        LexiconEntry::new(
            "jaw pain",
            Symptom,
            &["jaw pain", "pain in my jaw", "jaw ache", "aching jaw"],
        ),
        LexiconEntry::new(
            "back pain",
            Symptom,
            &["back pain", "backache", "pain in my back", "lower back pain"],
        ),
        LexiconEntry::new(
            "confusion",
            Symptom,
            &["confusion", "confused", "disoriented", "not thinking straight"],
        ),
        LexiconEntry::new(
            "slurred speech",
            Symptom,
            &["slurred speech", "slurring", "trouble speaking", "words are slurred"],
        ),
        LexiconEntry::new(
            "facial droop",
            Symptom,
            &[
                "facial droop",
                "face drooping",
                "drooping face",
                "face is drooping",
                "face droops",
            ],
        ),
        LexiconEntry::new(
            "numbness",
            Symptom,
            &["numbness", "numb", "tingling", "pins and needles"],
        ),
        LexiconEntry::new("swelling", Symptom, &["swelling", "swollen"]),
        LexiconEntry::new("rash", Symptom, &["rash", "hives", "itchy skin"]),
        LexiconEntry::new(
            "diarrhea",
            Symptom,
            &["diarrhea", "diarrhoea", "loose stools", "the runs"],
        ),
        LexiconEntry::new("stiff neck", Symptom, &["stiff neck", "neck stiffness"]),
        LexiconEntry::new(
            "blurred vision",
            Symptom,
            &["blurred vision", "blurry vision", "vision loss", "double vision"],
        ),
        LexiconEntry::new("bleeding", Symptom, &["bleeding", "blood loss"]),
        LexiconEntry::new(
            "pain",
            Symptom,
            &[
                "pain", "pains", "ache", "aches", "aching", "hurts", "hurting", "sore",
                "throbbing", "stabbing", "cramping",
            ],
        ),
    ]
}

fn body_part_entries() -> Vec<LexiconEntry> {
    use EntityCategory::BodyPart;

    vec![
        LexiconEntry::new("head", BodyPart, &["head", "forehead", "temple", "temples"]),
        LexiconEntry::new("neck", BodyPart, &["neck"]),
        LexiconEntry::new("throat", BodyPart, &["throat"]),
        LexiconEntry::new("jaw", BodyPart, &["jaw"]),
        LexiconEntry::new("eye", BodyPart, &["eye", "eyes"]),
        LexiconEntry::new("ear", BodyPart, &["ear", "ears"]),
        LexiconEntry::new("nose", BodyPart, &["nose", "sinuses"]),
        LexiconEntry::new("shoulder", BodyPart, &["shoulder", "shoulders"]),
        LexiconEntry::new("arm", BodyPart, &["arm", "arms", "elbow", "elbows"]),
        LexiconEntry::new("hand", BodyPart, &["hand", "hands", "wrist", "wrists", "finger", "fingers"]),
        LexiconEntry::new("chest", BodyPart, &["chest", "ribs"]),
        LexiconEntry::new("heart", BodyPart, &["heart"]),
        LexiconEntry::new("lung", BodyPart, &["lung", "lungs"]),
        LexiconEntry::new("back", BodyPart, &["back", "spine", "lower back"]),
        LexiconEntry::new("abdomen", BodyPart, &["abdomen", "stomach", "belly", "tummy"]),
        LexiconEntry::new("pelvis", BodyPart, &["pelvis", "groin"]),
        LexiconEntry::new("hip", BodyPart, &["hip", "hips"]),
        LexiconEntry::new("leg", BodyPart, &["leg", "legs", "thigh", "thighs", "calf", "calves"]),
        LexiconEntry::new("knee", BodyPart, &["knee", "knees"]),
        LexiconEntry::new("foot", BodyPart, &["foot", "feet", "ankle", "ankles", "toe", "toes"]),
        LexiconEntry::new("skin", BodyPart, &["skin"]),
        LexiconEntry::new("kidney", BodyPart, &["kidney", "kidneys"]),
    ]
}

fn condition_entries() -> Vec<LexiconEntry> {
    use EntityCategory::Condition;

    vec![
        LexiconEntry::new("diabetes", Condition, &["diabetes", "diabetic"]),
        LexiconEntry::new(
            "hypertension",
            Condition,
            &["hypertension", "high blood pressure"],
        ),
        LexiconEntry::new("asthma", Condition, &["asthma", "asthmatic"]),
        LexiconEntry::new("copd", Condition, &["copd", "emphysema"]),
        LexiconEntry::new("arthritis", Condition, &["arthritis"]),
        LexiconEntry::new("migraine", Condition, &["migraine", "migraines"]),
        LexiconEntry::new("depression", Condition, &["depression", "depressed"]),
        LexiconEntry::new("anxiety", Condition, &["anxiety", "panic attack", "panic attacks"]),
        LexiconEntry::new("influenza", Condition, &["flu", "influenza"]),
        LexiconEntry::new("common cold", Condition, &["common cold", "a cold", "head cold"]),
        LexiconEntry::new("covid", Condition, &["covid", "coronavirus"]),
        LexiconEntry::new("pneumonia", Condition, &["pneumonia"]),
        LexiconEntry::new("bronchitis", Condition, &["bronchitis"]),
        LexiconEntry::new("infection", Condition, &["infection", "infected"]),
        LexiconEntry::new(
            "urinary tract infection",
            Condition,
            &["urinary tract infection", "uti", "bladder infection"],
        ),
        LexiconEntry::new("heart disease", Condition, &["heart disease", "heart condition"]),
        LexiconEntry::new("heart attack", Condition, &["heart attack", "myocardial infarction"]),
        LexiconEntry::new("stroke", Condition, &["stroke"]),
        LexiconEntry::new("angina", Condition, &["angina"]),
        LexiconEntry::new("cancer", Condition, &["cancer", "tumor", "tumour"]),
        LexiconEntry::new("kidney stones", Condition, &["kidney stones", "kidney stone"]),
        LexiconEntry::new("pregnancy", Condition, &["pregnant", "pregnancy"]),
    ]
}

fn medication_entries() -> Vec<LexiconEntry> {
    use EntityCategory::Medication;

    vec![
        LexiconEntry::new("ibuprofen", Medication, &["ibuprofen", "advil", "motrin"]),
        LexiconEntry::new(
            "acetaminophen",
            Medication,
            &["acetaminophen", "paracetamol", "tylenol"],
        ),
        LexiconEntry::new("aspirin", Medication, &["aspirin"]),
        LexiconEntry::new("antibiotics", Medication, &["antibiotic", "antibiotics", "amoxicillin"]),
        LexiconEntry::new("insulin", Medication, &["insulin"]),
        LexiconEntry::new("metformin", Medication, &["metformin"]),
        LexiconEntry::new("inhaler", Medication, &["inhaler", "albuterol", "ventolin"]),
        LexiconEntry::new("steroids", Medication, &["steroid", "steroids", "prednisone"]),
        LexiconEntry::new("nitroglycerin", Medication, &["nitroglycerin", "nitro"]),
        LexiconEntry::new("antihistamine", Medication, &["antihistamine", "antihistamines", "benadryl"]),
        LexiconEntry::new("blood thinners", Medication, &["blood thinner", "blood thinners", "warfarin"]),
        LexiconEntry::new(
            "medication",
            Medication,
            &["medication", "medications", "medicine", "pills", "tablets"],
        ),
    ]
}

fn temporal_entries() -> Vec<LexiconEntry> {
    literal_entries(
        EntityCategory::Temporal,
        &[
            "today",
            "yesterday",
            "tonight",
            "this morning",
            "this afternoon",
            "this evening",
            "last night",
            "last week",
            "last month",
            "since yesterday",
            "since this morning",
            "since last night",
            "an hour ago",
            "a few hours ago",
            "hours ago",
            "minutes ago",
            "a few minutes ago",
            "days ago",
            "a few days",
            "few days",
            "for days",
            "for a week",
            "for weeks",
            "for months",
            "for years",
            "a long time",
            "just now",
            "right now",
            "suddenly",
            "sudden",
            "gradually",
            "on and off",
            "comes and goes",
            "every day",
            "at night",
            "in the morning",
            "after eating",
        ],
    )
}

fn severity_entries() -> Vec<LexiconEntry> {
    use EntityCategory::Severity;

    vec![
        LexiconEntry::new(
            "severe",
            Severity,
            &[
                "severe",
                "excruciating",
                "unbearable",
                "intense",
                "terrible",
                "awful",
                "extreme",
                "agonizing",
                "worst",
                "really bad",
            ],
        ),
        LexiconEntry::new(
            "moderate",
            Severity,
            &[
                "moderate",
                "noticeable",
                "uncomfortable",
                "bothersome",
                "manageable",
                "fairly bad",
            ],
        ),
        LexiconEntry::new(
            "mild",
            Severity,
            &["mild", "slight", "slightly", "a little", "minor", "a bit"],
        ),
    ]
}

fn urgency_cue_entries() -> Vec<LexiconEntry> {
    use EntityCategory::UrgencyCue;

    vec![
        LexiconEntry::new(
            "call emergency services",
            UrgencyCue,
            &["911", "call 911", "ambulance", "emergency room", "emergency services"],
        )
        .with_urgency(Urgency::Critical),
        LexiconEntry::new(
            "cannot breathe",
            UrgencyCue,
            &["can't breathe", "cannot breathe", "unable to breathe", "can not breathe"],
        )
        .with_urgency(Urgency::Critical),
        LexiconEntry::new(
            "uncontrolled bleeding",
            UrgencyCue,
            &[
                "bleeding heavily",
                "won't stop bleeding",
                "coughing up blood",
                "vomiting blood",
                "throwing up blood",
            ],
        )
        .with_urgency(Urgency::Critical),
        LexiconEntry::new(
            "self harm",
            UrgencyCue,
            &["kill myself", "want to die", "suicidal", "end my life", "hurt myself"],
        )
        .with_urgency(Urgency::Critical),
        LexiconEntry::new(
            "worst headache of my life",
            UrgencyCue,
            &["worst headache of my life", "worst headache ever"],
        )
        .with_urgency(Urgency::Critical),
        LexiconEntry::new(
            "emergency",
            UrgencyCue,
            &["emergency", "urgent", "urgently", "right away", "immediately"],
        )
        .with_urgency(Urgency::High),
    ]
}

pub(super) fn symptom_profiles() -> Vec<SymptomProfile> {
    vec![
        SymptomProfile::new("chest pain", 0.9, Urgency::Critical)
            .related(&["shortness of breath", "diaphoresis", "nausea", "arm pain", "jaw pain"])
            .causes(&["heart attack", "angina", "anxiety", "muscle strain", "pneumonia"])
            .questions(&[
                "Does the pain spread to your arm, jaw, or back?",
                "Are you having trouble breathing?",
                "Are you sweating or feeling nauseous?",
            ]),
        SymptomProfile::new("shortness of breath", 0.9, Urgency::High)
            .related(&["chest pain", "cough", "diaphoresis", "palpitations"])
            .causes(&["asthma", "pneumonia", "heart failure", "anxiety", "pulmonary embolism"])
            .questions(&[
                "Did the breathing difficulty come on suddenly?",
                "Is it worse when lying down or with exertion?",
                "Do you have a history of asthma or lung disease?",
            ]),
        SymptomProfile::new("headache", 0.85, Urgency::Moderate)
            .related(&["nausea", "blurred vision", "fever", "stiff neck"])
            .causes(&["tension headache", "migraine", "dehydration", "sinus infection", "high blood pressure"])
            .questions(&[
                "Where exactly is the headache located?",
                "Is this the worst headache you have ever had?",
                "Do you have any vision changes or sensitivity to light?",
            ]),
        SymptomProfile::new("fever", 0.85, Urgency::Moderate)
            .related(&["chills", "fatigue", "headache", "cough"])
            .causes(&["viral infection", "bacterial infection", "influenza", "covid"])
            .questions(&[
                "Have you measured your temperature?",
                "How long have you had the fever?",
                "Do you have any other symptoms like cough or rash?",
            ]),
        SymptomProfile::new("chills", 0.75, Urgency::Low)
            .related(&["fever", "fatigue"])
            .causes(&["infection", "influenza", "cold exposure"]),
        SymptomProfile::new("abdominal pain", 0.85, Urgency::Moderate)
            .related(&["nausea", "vomiting", "diarrhea", "fever"])
            .causes(&["gastroenteritis", "appendicitis", "food poisoning", "gallstones", "ulcer"])
            .questions(&[
                "Where in your abdomen is the pain located?",
                "Is the pain constant or does it come and go?",
                "Have you had any nausea, vomiting, or changes in bowel movements?",
            ]),
        SymptomProfile::new("nausea", 0.8, Urgency::Low)
            .related(&["vomiting", "abdominal pain", "dizziness", "headache"])
            .causes(&["gastroenteritis", "food poisoning", "migraine", "medication side effect", "pregnancy"])
            .questions(&[
                "Have you been able to keep fluids down?",
                "Is the nausea accompanied by vomiting?",
            ]),
        SymptomProfile::new("vomiting", 0.85, Urgency::Moderate)
            .related(&["nausea", "abdominal pain", "diarrhea", "fever"])
            .causes(&["gastroenteritis", "food poisoning", "migraine"])
            .questions(&[
                "How many times have you vomited?",
                "Have you seen any blood in the vomit?",
            ]),
        SymptomProfile::new("diaphoresis", 0.75, Urgency::Moderate)
            .related(&["chest pain", "fever", "palpitations"])
            .causes(&["cardiac event", "infection", "low blood sugar", "anxiety"]),
        SymptomProfile::new("dizziness", 0.8, Urgency::Moderate)
            .related(&["fainting", "nausea", "palpitations", "headache"])
            .causes(&["dehydration", "low blood pressure", "inner ear problem", "low blood sugar"])
            .questions(&[
                "Does the room spin or do you feel like you might faint?",
                "Does it happen when you stand up?",
            ]),
        SymptomProfile::new("fainting", 0.9, Urgency::High)
            .related(&["dizziness", "palpitations", "chest pain"])
            .causes(&["vasovagal episode", "arrhythmia", "dehydration", "low blood sugar"])
            .questions(&[
                "How long were you unconscious?",
                "Did you have warning signs before you fainted?",
            ]),
        SymptomProfile::new("cough", 0.8, Urgency::Low)
            .related(&["fever", "sore throat", "shortness of breath"])
            .causes(&["common cold", "bronchitis", "asthma", "allergies", "pneumonia"])
            .questions(&[
                "Is the cough dry or are you bringing anything up?",
                "How long have you been coughing?",
            ]),
        SymptomProfile::new("sore throat", 0.8, Urgency::Low)
            .related(&["fever", "cough"])
            .causes(&["viral pharyngitis", "strep throat", "common cold"]),
        SymptomProfile::new("fatigue", 0.7, Urgency::Low)
            .related(&["fever", "weakness"])
            .causes(&["viral infection", "anemia", "poor sleep", "thyroid problem"]),
        SymptomProfile::new("weakness", 0.7, Urgency::Moderate)
            .related(&["numbness", "facial droop", "slurred speech", "fatigue"])
            .causes(&["stroke", "dehydration", "infection", "electrolyte imbalance"])
            .questions(&[
                "Is the weakness on one side of your body?",
                "Did it start suddenly?",
            ]),
        SymptomProfile::new("palpitations", 0.8, Urgency::Moderate)
            .related(&["chest pain", "dizziness", "shortness of breath"])
            .causes(&["anxiety", "caffeine", "arrhythmia", "thyroid problem"]),
        SymptomProfile::new("arm pain", 0.8, Urgency::Moderate)
            .related(&["chest pain", "jaw pain"])
            .causes(&["muscle strain", "cardiac event", "nerve compression"]),
        SymptomProfile::new("jaw pain", 0.8, Urgency::Moderate)
            .related(&["chest pain", "arm pain"])
            .causes(&["dental problem", "jaw joint disorder", "cardiac event"]),
        SymptomProfile::new("back pain", 0.8, Urgency::Low)
            .causes(&["muscle strain", "disc problem", "kidney stones"]),
        SymptomProfile::new("confusion", 0.85, Urgency::High)
            .related(&["fever", "headache", "slurred speech"])
            .causes(&["infection", "stroke", "low blood sugar", "medication side effect"]),
        SymptomProfile::new("slurred speech", 0.9, Urgency::Critical)
            .related(&["facial droop", "weakness", "numbness", "confusion"])
            .causes(&["stroke", "transient ischemic attack"]),
        SymptomProfile::new("facial droop", 0.9, Urgency::Critical)
            .related(&["slurred speech", "weakness", "numbness"])
            .causes(&["stroke", "bell's palsy"]),
        SymptomProfile::new("numbness", 0.75, Urgency::Moderate)
            .related(&["weakness", "facial droop"])
            .causes(&["nerve compression", "stroke", "diabetes"]),
        SymptomProfile::new("swelling", 0.7, Urgency::Low)
            .causes(&["injury", "infection", "fluid retention"]),
        SymptomProfile::new("rash", 0.75, Urgency::Low)
            .related(&["fever", "swelling"])
            .causes(&["allergic reaction", "viral infection", "eczema"]),
        SymptomProfile::new("diarrhea", 0.8, Urgency::Low)
            .related(&["vomiting", "abdominal pain", "fever"])
            .causes(&["gastroenteritis", "food poisoning", "irritable bowel"]),
        SymptomProfile::new("stiff neck", 0.8, Urgency::Moderate)
            .related(&["fever", "headache"])
            .causes(&["muscle strain", "meningitis"]),
        SymptomProfile::new("blurred vision", 0.8, Urgency::High)
            .related(&["headache", "dizziness"])
            .causes(&["migraine", "high blood pressure", "stroke", "eye condition"]),
        SymptomProfile::new("bleeding", 0.8, Urgency::High)
            .causes(&["injury", "blood thinner use", "clotting disorder"])
            .questions(&[
                "Where is the bleeding coming from?",
                "Has it slowed down with pressure?",
            ]),
        SymptomProfile::new("pain", 0.6, Urgency::Low)
            .questions(&[
                "Where exactly do you feel the pain?",
                "On a scale of 1 to 10, how bad is it?",
            ]),
    ]
}

pub(super) fn escalation_clusters() -> Vec<EscalationCluster> {
    vec![
        EscalationCluster::new(
            "acute_coronary_pattern",
            "chest pain with symptoms that commonly accompany a cardiac event",
            &["chest pain"],
            &[
                "nausea",
                "diaphoresis",
                "shortness of breath",
                "arm pain",
                "jaw pain",
                "dizziness",
                "vomiting",
            ],
            1,
            Urgency::Critical,
        ),
        EscalationCluster::new(
            "stroke_warning_signs",
            "speech disturbance together with one-sided neurological signs",
            &["slurred speech"],
            &["facial droop", "weakness", "numbness", "confusion", "blurred vision"],
            1,
            Urgency::Critical,
        ),
        EscalationCluster::new(
            "facial_weakness_pattern",
            "facial droop together with limb weakness or numbness",
            &["facial droop"],
            &["weakness", "numbness"],
            1,
            Urgency::Critical,
        ),
        EscalationCluster::new(
            "meningitis_warning_signs",
            "fever with a stiff neck",
            &["fever", "stiff neck"],
            &["headache", "confusion", "rash"],
            0,
            Urgency::Critical,
        ),
        EscalationCluster::new(
            "respiratory_distress",
            "breathing difficulty with signs of poor oxygenation or cardiac strain",
            &["shortness of breath"],
            &["chest pain", "confusion", "fainting", "palpitations"],
            1,
            Urgency::Critical,
        ),
        EscalationCluster::new(
            "cardiac_syncope",
            "fainting with palpitations or chest pain",
            &["fainting"],
            &["palpitations", "chest pain"],
            1,
            Urgency::Critical,
        ),
        EscalationCluster::new(
            "systemic_infection",
            "fever with signs that the infection is affecting the whole body",
            &["fever"],
            &["confusion", "palpitations", "shortness of breath", "chills"],
            2,
            Urgency::High,
        ),
        EscalationCluster::new(
            "dehydration_risk",
            "fluid loss from both ends",
            &["vomiting", "diarrhea"],
            &["dizziness", "weakness", "fatigue"],
            0,
            Urgency::High,
        ),
    ]
}

pub(super) fn negation_markers() -> Vec<String> {
    strings(&[
        "no",
        "not",
        "never",
        "without",
        "denies",
        "deny",
        "denied",
        "don't",
        "dont",
        "doesn't",
        "didn't",
        "haven't",
        "hasn't",
        "free of",
        "no sign of",
        "negative for",
        "ruled out",
        "none",
    ])
}

/// "and" closes a negation so "no fever and chest pain" still asserts the
/// chest pain; "or" does not, so "no fever or chills" denies both.
pub(super) fn clause_breakers() -> Vec<String> {
    strings(&["but", "however", "although", "though", "except", "and"])
}

pub(super) fn duration_markers() -> DurationMarkers {
    DurationMarkers {
        acute: strings(&[
            "sudden",
            "suddenly",
            "minute",
            "minutes",
            "hour",
            "hours",
            "today",
            "tonight",
            "this morning",
            "last night",
            "just now",
            "right now",
        ]),
        subacute: strings(&[
            "day",
            "days",
            "few days",
            "week",
            "yesterday",
            "last week",
        ]),
        chronic: strings(&[
            "weeks",
            "months",
            "month",
            "years",
            "year",
            "long time",
            "always",
            "chronic",
            "ages",
        ]),
    }
}
