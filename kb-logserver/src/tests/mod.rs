mod logserver_test;

use kb_testutils::*;

use super::*;
