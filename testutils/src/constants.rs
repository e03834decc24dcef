pub const TEST_NAMESPACE: &str = "test-builds";
pub const TEST_BUILD: &str = "the-build";
pub const TEST_BUILD_ID: &str = "test-builds/the-build";
pub const TEST_POD: &str = "the-build-pod";
pub const TEST_CONTAINER: &str = "sti-build";
pub const TEST_HOST: &str = "node-1";
pub const TEST_IMAGE_TAG: &str = "registry.test:5000/apps/the-app:v1";

pub const TEST_LOG: &str = "\
2015-03-12T18:42:11.123Z Step 1 : FROM centos
2015-03-12T18:42:12Z  ---> 88f9454e60dd

2015-03-12T18:42:13.5Z Successfully built 3f15b1f31b29
";
