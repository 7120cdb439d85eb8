//! Execution role ARN derivation from the caller identity.

use crate::cloud::CallerIdentity;

const DEFAULT_PARTITION: &str = "aws";

fn arn_field(arn: &str, index: usize) -> Option<&str> {
    let mut fields = arn.splitn(6, ':');
    if fields.next() != Some("arn") {
        return None;
    }
    fields
        .nth(index - 1)
        .filter(|field| !field.is_empty())
}

/// The account id of an ARN (its fifth field).
pub fn account_id_from_arn(arn: &str) -> Option<&str> {
    arn_field(arn, 4)
}

/// The partition of an ARN (its second field).
pub fn partition_from_arn(arn: &str) -> Option<&str> {
    arn_field(arn, 1)
}

/// Pure function: the ARN of `role_name` in the caller's account.
///
/// The account comes from the caller ARN, then from the identity's own
/// account field. Returns `None` when neither is usable.
pub fn role_arn(identity: &CallerIdentity, role_name: &str) -> Option<String> {
    let caller_arn = identity.arn.as_deref();
    let account = caller_arn
        .and_then(account_id_from_arn)
        .or_else(|| identity.account.as_deref().filter(|a| !a.is_empty()))?;
    let partition = caller_arn
        .and_then(partition_from_arn)
        .unwrap_or(DEFAULT_PARTITION);

    Some(format!("arn:{}:iam::{}:role/{}", partition, account, role_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_from_arn() {
        assert_eq!(
            account_id_from_arn("arn:aws:iam::123456789012:user/deployer"),
            Some("123456789012")
        );
        assert_eq!(
            account_id_from_arn("arn:aws:sts::123456789012:assumed-role/ops/session"),
            Some("123456789012")
        );
        assert_eq!(account_id_from_arn("arn:aws:s3:::bucket"), None);
        assert_eq!(account_id_from_arn("not-an-arn"), None);
        assert_eq!(account_id_from_arn("arn:aws"), None);
    }

    #[test]
    fn test_partition_from_arn() {
        assert_eq!(
            partition_from_arn("arn:aws-cn:iam::123456789012:user/deployer"),
            Some("aws-cn")
        );
    }

    #[test]
    fn test_role_arn_from_caller_arn() {
        let identity = CallerIdentity {
            account: Some("999999999999".to_string()),
            arn: Some("arn:aws:iam::123456789012:user/deployer".to_string()),
        };
        assert_eq!(
            role_arn(&identity, "DynamoDBLambdaAutoscale").as_deref(),
            Some("arn:aws:iam::123456789012:role/DynamoDBLambdaAutoscale")
        );
    }

    #[test]
    fn test_role_arn_keeps_partition() {
        let identity = CallerIdentity {
            account: None,
            arn: Some("arn:aws-us-gov:iam::123456789012:user/deployer".to_string()),
        };
        assert_eq!(
            role_arn(&identity, "scaler").as_deref(),
            Some("arn:aws-us-gov:iam::123456789012:role/scaler")
        );
    }

    #[test]
    fn test_role_arn_falls_back_to_account() {
        let identity = CallerIdentity {
            account: Some("123456789012".to_string()),
            arn: None,
        };
        assert_eq!(
            role_arn(&identity, "scaler").as_deref(),
            Some("arn:aws:iam::123456789012:role/scaler")
        );
    }

    #[test]
    fn test_role_arn_without_account() {
        assert_eq!(role_arn(&CallerIdentity::default(), "scaler"), None);
        let identity = CallerIdentity {
            account: Some(String::new()),
            arn: Some("garbage".to_string()),
        };
        assert_eq!(role_arn(&identity, "scaler"), None);
    }
}
