mod refresh_tests;
