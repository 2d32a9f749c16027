//! Canned replies used when the assistant runs without a remote endpoint.

/// Ordered (trigger, reply) pairs. The first trigger found in the lowercased
/// input wins, so more specific phrases must come before broader ones.
pub const MOCK_RESPONSES: &[(&str, &str)] = &[
    (
        "what is devops",
        "DevOps is a set of practices that combines software development (Dev) and IT operations (Ops). It aims to shorten the systems development life cycle and provide continuous delivery with high software quality. DevOps focuses on automation, collaboration, communication, and integration between developers and IT operations teams.",
    ),
    (
        "tools for devops",
        "Common DevOps tools include:\n\n1. CI/CD: Jenkins, GitLab CI, GitHub Actions, CircleCI\n2. Configuration Management: Ansible, Chef, Puppet\n3. Containerization: Docker, Kubernetes, OpenShift\n4. Infrastructure as Code: Terraform, AWS CloudFormation\n5. Monitoring: Prometheus, Grafana, ELK Stack\n6. Version Control: Git, GitHub, GitLab, Bitbucket",
    ),
    (
        "devops best practices",
        "DevOps best practices include:\n\n1. Continuous Integration/Continuous Delivery (CI/CD)\n2. Infrastructure as Code (IaC)\n3. Microservices architecture\n4. Monitoring and logging\n5. Automated testing\n6. Configuration management\n7. Security as code (DevSecOps)\n8. Collaboration and communication\n9. Incident management with post-mortems",
    ),
    (
        "help",
        "I'm your DevOps assistant. You can ask me about:\n\n- DevOps principles and practices\n- CI/CD pipelines\n- Infrastructure as Code\n- Containerization\n- Cloud services\n- Monitoring and observability\n- DevSecOps\n\nJust type your question and I'll do my best to help!",
    ),
];

/// Looks up a canned reply for `input`, falling back to a generic answer
/// that quotes the input back.
pub fn mock_reply(input: &str) -> String {
    let lowered = input.to_lowercase();
    MOCK_RESPONSES
        .iter()
        .find(|(trigger, _)| lowered.contains(trigger))
        .map(|(_, reply)| reply.to_string())
        .unwrap_or_else(|| fallback_reply(input))
}

fn fallback_reply(input: &str) -> String {
    format!(
        "I'm your DevOps assistant. I understand you asked about \"{}\". While we're setting up the connection to Amazon Bedrock, I can answer basic questions about DevOps. Try asking about \"what is DevOps\", \"DevOps tools\", or \"DevOps best practices\".",
        input
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_what_is_devops_is_case_insensitive() {
        assert_eq!(mock_reply("What is DevOps"), MOCK_RESPONSES[0].1);
        assert_eq!(mock_reply("so... WHAT IS DEVOPS?"), MOCK_RESPONSES[0].1);
    }

    #[test]
    fn test_first_match_wins_in_table_order() {
        // Contains both "devops best practices" and "help".
        let reply = mock_reply("help me with devops best practices");
        assert_eq!(reply, MOCK_RESPONSES[2].1);
    }

    #[test]
    fn test_fallback_echoes_input_verbatim() {
        let input = "How do I Deploy on Fridays?";
        let reply = mock_reply(input);
        assert!(reply.contains(&format!("\"{}\"", input)));
        assert!(MOCK_RESPONSES.iter().all(|(_, canned)| *canned != reply));
    }

    #[test]
    fn test_triggers_are_lowercase() {
        for (trigger, _) in MOCK_RESPONSES {
            assert_eq!(*trigger, trigger.to_lowercase());
        }
    }
}
