use crate::models::Language;

const SYSTEM_PROMPT_EN: &str = "You are a helpful and friendly AI assistant.
Answer questions clearly and politely in English.
Be professional and accurate in your responses.";

const SYSTEM_PROMPT_AR: &str = "أنت مساعد ذكاء اصطناعي مفيد وودود.
أجب على الأسئلة باللغة العربية بطريقة واضحة ومهذبة.
استخدم لهجة رسمية واحترافية.";

/// Static system prompt for a chat exchange
pub fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::Ar => SYSTEM_PROMPT_AR,
        Language::En => SYSTEM_PROMPT_EN,
    }
}

/// Wrap rendered history in the summarization instruction
pub fn summary_prompt(history: &str, language: Language) -> String {
    match language {
        Language::Ar => format!(
            "بناءً على سجل المحادثات التالي، اكتب ملخصاً قصيراً (من جملتين إلى خمس جمل) \
             يصف اهتمامات المستخدم والمواضيع التي يسأل عنها وطريقة استخدامه للمساعد:\n\n\
             {}\n\nالملخص:",
            history
        ),
        Language::En => format!(
            "Based on the following chat history, write a short narrative summary (2-5 sentences) \
             describing the user's interests, the topics they ask about, and how they use the assistant:\n\n\
             {}\n\nSummary:",
            history
        ),
    }
}

/// Canned reply used when no provider has credentials
pub fn demo_response(model_ref: &str, message: &str, language: Language) -> String {
    match language {
        Language::Ar => format!(
            "[وضع العرض] النموذج: {}\nرسالتك: \"{}\"\nلا يوجد مزود ذكاء اصطناعي مُهيأ. \
             أضف مفتاح API لأحد المزودين للحصول على ردود حقيقية.",
            model_ref, message
        ),
        Language::En => format!(
            "[Demo mode] Model: {}\nYou said: \"{}\"\nNo AI provider is configured. \
             Add an API key for a provider to get real responses.",
            model_ref, message
        ),
    }
}
