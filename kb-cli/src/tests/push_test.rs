use std::time::Duration;

use super::*;
use crate::push::*;

fn parse_push_args(extra: &[&str]) -> push::Args {
    let mut argv = vec!["kbctl", "push", TEST_IMAGE_TAG];
    argv.extend_from_slice(extra);
    match KbCommandRoot::try_parse_from(argv).unwrap().subcommand {
        KbSubcommand::Push(args) => args,
        _ => panic!("expected the push subcommand"),
    }
}

#[rstest]
fn test_retry_policy_defaults() {
    let policy = retry_policy(&parse_push_args(&[]), None).unwrap();
    assert_eq!(policy.max_retries, 2);
    assert_eq!(policy.delay, Duration::from_secs(10));
}

#[rstest]
fn test_retry_policy_flags() {
    let policy = retry_policy(&parse_push_args(&["--retries", "0", "--retry-delay", "1m 30s"]), None).unwrap();
    assert_eq!(policy.max_retries, 0);
    assert_eq!(policy.delay, Duration::from_secs(90));
}

#[rstest]
fn test_retry_policy_from_config_file() {
    let config_file = write_config_file(
        "
proxyBase: https://apiserver.test:6443
push:
  retries: 5
  delaySeconds: 3
",
    );

    let policy = retry_policy(&parse_push_args(&[]), Some(path_str(&config_file))).unwrap();
    assert_eq!(policy.max_retries, 5);
    assert_eq!(policy.delay, Duration::from_secs(3));

    let policy = retry_policy(&parse_push_args(&["--retries", "1"]), Some(path_str(&config_file))).unwrap();
    assert_eq!(policy.max_retries, 1);
    assert_eq!(policy.delay, Duration::from_secs(3));
}

#[rstest]
fn test_push_auth() {
    assert_eq!(push_auth(&parse_push_args(&[])), None);

    let auth = push_auth(&parse_push_args(&["-u", "builder", "--password", "hunter2", "--registry", "registry.test:5000"]))
        .unwrap();
    assert_eq!(auth.username, "builder");
    assert_eq!(auth.password, "hunter2");
    assert_eq!(auth.server_address.as_deref(), Some("registry.test:5000"));
}

#[rstest]
fn test_push_username_requires_password() {
    // The password may also come from the environment, in which case -u alone is fine
    let res = KbCommandRoot::try_parse_from(["kbctl", "push", TEST_IMAGE_TAG, "-u", "builder"]);
    if std::env::var(PUSH_PASSWORD_ENV_VAR).is_err() {
        assert!(res.is_err());
    }
}

#[rstest]
#[tokio::test]
async fn test_push_cmd_with_failing_binary() {
    let args = parse_push_args(&["--retries", "0", "--docker-binary", "false"]);
    let err = cmd(&args, None).await.unwrap_err();
    assert!(err.to_string().contains("1 attempt"));
}
